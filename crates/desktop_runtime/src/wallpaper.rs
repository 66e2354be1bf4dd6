//! Built-in desktop wallpaper presets cycled from the desktop context menu.

/// One gradient wallpaper preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallpaperPreset {
    pub wallpaper_id: &'static str,
    pub display_name: &'static str,
    /// CSS `background` value applied to the desktop surface.
    pub background: &'static str,
}

pub const WALLPAPER_PRESETS: [WallpaperPreset; 5] = [
    WallpaperPreset {
        wallpaper_id: "bloom",
        display_name: "Bloom",
        background: "linear-gradient(135deg, #0078d4 0%, #001f54 50%, #1a0033 100%)",
    },
    WallpaperPreset {
        wallpaper_id: "midnight",
        display_name: "Midnight",
        background: "linear-gradient(135deg, #1a1a2e 0%, #16213e 50%, #0f3460 100%)",
    },
    WallpaperPreset {
        wallpaper_id: "lagoon",
        display_name: "Lagoon",
        background: "linear-gradient(135deg, #2d1b69 0%, #11998e 100%)",
    },
    WallpaperPreset {
        wallpaper_id: "dusk",
        display_name: "Dusk",
        background: "linear-gradient(135deg, #0f0c29 0%, #302b63 50%, #24243e 100%)",
    },
    WallpaperPreset {
        wallpaper_id: "deep-sea",
        display_name: "Deep Sea",
        background: "linear-gradient(135deg, #000428 0%, #004e92 100%)",
    },
];

/// Preset for a stored index; out-of-range indices wrap.
pub fn wallpaper_preset(index: usize) -> &'static WallpaperPreset {
    &WALLPAPER_PRESETS[index % WALLPAPER_PRESETS.len()]
}

/// Index of the preset after `index`, wrapping at the end of the list.
pub fn next_wallpaper_index(index: usize) -> usize {
    (index + 1) % WALLPAPER_PRESETS.len()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn cycling_wraps_back_to_first_preset() {
        let mut index = 0;
        for _ in 0..WALLPAPER_PRESETS.len() {
            index = next_wallpaper_index(index);
        }
        assert_eq!(index, 0);
        assert_eq!(wallpaper_preset(7).wallpaper_id, "lagoon");
    }
}
