//! Per-frame driver tying input, lifecycle events, the resolver and the
//! focus state machine together.

use anyhow::Result;
use glam::Vec2;
use log::{info, warn};

use crate::config::{Settings, SettingsStore};
use crate::events::{EventBus, EventKind, SubscriptionId};
use crate::focus::{FocusContext, FocusStateMachine, Mode};
use crate::input::{read_action, FocusAction};
use crate::resolver::TargetResolver;
use crate::service::{FocusCommand, FocusService};
use crate::traits::{Controller, SceneQuery};
use crate::types::Placement;

/// On-screen time of the mode change announcement
const MODE_MESSAGE_SECS: f32 = 3.0;

pub struct FocusChanger {
    machine: FocusStateMachine,
    resolver: TargetResolver,
    settings: Settings,
    store: Option<SettingsStore>,
    subscription: Option<SubscriptionId>,
    service: FocusService,
}

impl FocusChanger {
    /// Build from in-memory settings; mode changes are not persisted
    pub fn new(settings: Settings) -> Self {
        let machine =
            FocusStateMachine::new(settings.mode).with_messages(settings.show_update_message);
        Self {
            machine,
            resolver: TargetResolver::default(),
            settings,
            store: None,
            subscription: None,
            service: FocusService::new(),
        }
    }

    /// Load settings from `store` (creating the file if needed) and start
    pub fn start(store: SettingsStore, bus: &mut EventBus) -> Result<Self> {
        let settings = store.load_or_create()?;
        info!(
            "starting camera focus changer (key {:?}, mode {})",
            settings.action_key, settings.mode
        );
        let mut changer = Self::new(settings);
        changer.store = Some(store);
        changer.attach(bus);
        Ok(changer)
    }

    /// Subscribe to lifecycle events and open the service
    pub fn attach(&mut self, bus: &mut EventBus) {
        if self.subscription.is_none() {
            self.subscription = Some(bus.subscribe(&EventKind::ALL));
        }
        self.service.set_available(true);
    }

    /// Unsubscribe and close the service
    pub fn stop(&mut self, bus: &mut EventBus) {
        info!("stopping camera focus changer");
        if let Some(id) = self.subscription.take() {
            bus.unsubscribe(id);
        }
        self.service.set_available(false);
    }

    pub fn with_resolver(mut self, resolver: TargetResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Handle other subsystems use to drive the focus
    pub fn service(&self) -> FocusService {
        self.service.clone()
    }

    pub fn machine(&self) -> &FocusStateMachine {
        &self.machine
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_running(&self) -> bool {
        self.subscription.is_some()
    }

    /// Run one frame: pending notifications, service requests, user input,
    /// then the position update.
    pub fn update(
        &mut self,
        bus: &mut EventBus,
        controller: &dyn Controller,
        scene: &dyn SceneQuery,
        ctx: &mut FocusContext<'_>,
        dt: f32,
    ) {
        if let Some(id) = self.subscription {
            for event in bus.drain(id) {
                self.machine.handle_event(ctx, &event);
            }
        }

        for command in self.service.take_commands() {
            match command {
                FocusCommand::FocusOn(object) => self.machine.focus_on(ctx, object),
                FocusCommand::Reset => self.machine.reset_focus(ctx),
            }
        }

        match read_action(controller, self.settings.action_key) {
            Some(FocusAction::CycleMode) => {
                // The new mode takes effect from the next frame
                self.cycle_mode(ctx);
                return;
            }
            Some(FocusAction::Retarget { pointer }) => self.retarget(ctx, scene, pointer),
            None => {}
        }

        self.machine.tick(ctx, dt);
    }

    fn cycle_mode(&mut self, ctx: &mut FocusContext<'_>) {
        let mode = self.machine.cycle_mode();
        ctx.notifier
            .post_message(mode.announcement(), MODE_MESSAGE_SECS, Placement::UpperCenter);
        self.persist_mode(mode);
    }

    /// Switch the transition mode and persist it
    pub fn set_mode(&mut self, mode: Mode) {
        self.machine.set_mode(mode);
        self.persist_mode(mode);
    }

    fn persist_mode(&mut self, mode: Mode) {
        self.settings.mode = mode;
        if let Some(store) = &self.store {
            if let Err(e) = store.save(&self.settings) {
                warn!("{e:#}");
            }
        }
    }

    fn retarget(
        &mut self,
        ctx: &mut FocusContext<'_>,
        scene: &dyn SceneQuery,
        pointer: Option<Vec2>,
    ) {
        if self.machine.within_debounce() {
            self.machine.mark_arrived();
            return;
        }

        let hit = pointer.and_then(|pointer| self.resolver.resolve(&*ctx.rig, scene, pointer));
        match hit {
            Some(object) => self.machine.focus_on(ctx, object),
            None if self.machine.target().is_some() => self.machine.reset_focus(ctx),
            None => self.machine.mark_arrived(),
        }
    }
}
