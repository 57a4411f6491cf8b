use serde::{Deserialize, Serialize};

/// Transition policy used when the focal target changes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Eased glide towards the target
    #[default]
    Smooth,
    /// Native instant follow of the rig
    Stock,
    /// Eased glide towards a target, native snap back to the vessel
    Hybrid,
}

impl Mode {
    /// Next mode in the user-facing cycle
    pub const fn next(self) -> Self {
        match self {
            Mode::Smooth => Mode::Stock,
            Mode::Stock => Mode::Hybrid,
            Mode::Hybrid => Mode::Smooth,
        }
    }

    /// On-screen text shown after switching to this mode
    pub const fn announcement(self) -> &'static str {
        match self {
            Mode::Smooth => "Camera focus mode: smooth glide",
            Mode::Stock => "Camera focus mode: stock (instant snapping)",
            Mode::Hybrid => "Camera focus mode: hybrid (smooth glide, snap back to active vessel)",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Mode::Smooth => "smooth",
            Mode::Stock => "stock",
            Mode::Hybrid => "hybrid",
        };
        f.write_str(name)
    }
}
