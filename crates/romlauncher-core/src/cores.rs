//! Default emulator-core mapping and launch planning.
//!
//! The engine only exposes the selected ROM's absolute path; this table is
//! what the launch collaborator consults to pick an emulator for it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::LauncherConfig;
use crate::path;

/// Standalone PSP emulator binary.
pub const PPSSPP_PATH: &str = "sdmc:/switch/ppsspp/PPSSPP_GL.nro";

/// Built-in extension to RetroArch core table.
const DEFAULT_CORES: &[(&str, &str)] = &[
    ("sfc", "snes9x"),
    ("smc", "snes9x"),
    ("nes", "fceumm"),
    ("md", "genesis_plus_gx"),
    ("gen", "genesis_plus_gx"),
    ("smd", "genesis_plus_gx"),
    ("bin", "genesis_plus_gx"),
    ("gb", "gambatte"),
    ("gbc", "gambatte"),
    ("gba", "mgba"),
];

/// Disc images that are only launchable from a PlayStation directory.
const PLAYSTATION_EXTENSIONS: &[&str] = &["chd", "cue"];
const PLAYSTATION_CORE: &str = "pcsx_rearmed";

/// Extensions handled by the standalone PSP emulator.
const PSP_EXTENSIONS: &[&str] = &["iso", "cso"];

/// Emulator chosen for a ROM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmulatorChoice {
    /// RetroArch with the named libretro core.
    RetroArch { core: String },
    /// Standalone PPSSPP.
    Ppsspp,
}

impl std::fmt::Display for EmulatorChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RetroArch { core } => write!(f, "RetroArch ({core})"),
            Self::Ppsspp => f.write_str("PPSSPP"),
        }
    }
}

/// Look up the built-in core for an extension (case-insensitive).
pub fn default_core(extension: &str) -> Option<&'static str> {
    let ext = extension.to_ascii_lowercase();
    DEFAULT_CORES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, core)| *core)
}

/// Pick an emulator for a ROM path.
///
/// `overrides` maps extensions to cores and wins over the built-in table.
pub fn derive_emulator(rom_path: &str, overrides: &BTreeMap<String, String>) -> Option<EmulatorChoice> {
    let ext = path::extension(rom_path)?.to_ascii_lowercase();

    if let Some(core) = overrides.get(&ext) {
        return Some(EmulatorChoice::RetroArch { core: core.clone() });
    }
    if PSP_EXTENSIONS.contains(&ext.as_str()) {
        return Some(EmulatorChoice::Ppsspp);
    }
    if PLAYSTATION_EXTENSIONS.contains(&ext.as_str()) {
        let in_playstation_dir = rom_path
            .split(path::SEPARATOR)
            .any(|segment| segment.eq_ignore_ascii_case("playstation"));
        return in_playstation_dir.then(|| EmulatorChoice::RetroArch {
            core: PLAYSTATION_CORE.to_string(),
        });
    }
    default_core(&ext).map(|core| EmulatorChoice::RetroArch {
        core: core.to_string(),
    })
}

/// A fully resolved launch, ready to hand to the platform loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchPlan {
    /// Selected emulator.
    pub emulator: EmulatorChoice,
    /// Binary to load next.
    pub program: String,
    /// Argument string passed to the program.
    pub arguments: String,
}

impl LaunchPlan {
    /// Resolve the launch for a ROM, or `None` when no emulator handles it.
    pub fn for_rom(rom_path: &str, config: &LauncherConfig) -> Option<Self> {
        let emulator = derive_emulator(rom_path, &config.core_overrides)?;
        // The loader expects paths without the mount prefix.
        let rom_arg = rom_path.strip_prefix("sdmc:").unwrap_or(rom_path);

        let (program, arguments) = match &emulator {
            EmulatorChoice::RetroArch { core } => {
                let core_path = path::join(&config.cores_dir, &format!("{core}_libretro_libnx.nro"));
                let arguments = format!("{core_path} \"{rom_arg}\"");
                (core_path, arguments)
            }
            EmulatorChoice::Ppsspp => {
                let arguments = format!("{PPSSPP_PATH} \"{rom_arg}\"");
                (PPSSPP_PATH.to_string(), arguments)
            }
        };

        Some(Self {
            emulator,
            program,
            arguments,
        })
    }
}
