/// Icon geometry, typography and output constants

pub mod geometry {
    /// Default canvas edge in pixels; every other size is resampled from this
    pub const CANVAS_SIZE: u32 = 1024;

    /// macOS standard: 832x832 icon body within a 1024x1024 canvas
    pub const ICON_SCALE: f32 = 0.8125;

    /// Corner radius as a fraction of the shorter side
    pub const CORNER_RATIO: f32 = 0.22;
}

pub mod squircle {
    //! Continuous-curvature corner constants (PaintCode's reverse-engineering of
    //! the iOS 7+ rounded rect). All values are multiples of the corner radius.

    /// Straight edges stop this many radii before the corner
    pub const LIMIT_FACTOR: f32 = 1.528_664_8;

    pub const P1: f32 = 1.528_664_8;
    pub const P2: f32 = 1.088_493_2;
    pub const P3: f32 = 0.868_406_9;
    pub const P4: f32 = 0.669_934_3;
    pub const P5: f32 = 0.631_494;
    pub const P6: f32 = 0.372_823_9;
    pub const P7: f32 = 0.169_060_1;

    pub const CP1: f32 = 0.065_496;
    pub const CP2: f32 = 0.074_911;
    pub const CP3: f32 = 0.169_059;
    pub const CP4: f32 = 0.372_824;
}

pub mod text {
    pub const LABEL: &str = "jj";

    /// Font size as a fraction of the icon body
    pub const FONT_SCALE: f32 = 0.70;

    /// Coverage above which a pixel counts as ink (~10% alpha)
    pub const INK_THRESHOLD: u8 = 26;

    pub const COLOR: [f32; 4] = [0.27, 0.27, 0.27, 1.0];
}

pub mod background {
    pub const GRADIENT_TOP: [f32; 4] = [0.95, 0.95, 0.95, 1.0];
    pub const GRADIENT_BOTTOM: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}

pub mod fonts {
    /// A font file and the face to use when it is a collection
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FontCandidate {
        pub path: &'static str,
        pub collection_index: u32,
    }

    const fn face(path: &'static str, collection_index: u32) -> FontCandidate {
        FontCandidate { path, collection_index }
    }

    /// Bold sans-serif faces probed in order when no font file is configured
    pub const SYSTEM_BOLD_CANDIDATES: &[FontCandidate] = &[
        // macOS: Helvetica Bold is face 1 of the system collection
        face("/System/Library/Fonts/Helvetica.ttc", 1),
        face("/System/Library/Fonts/Supplemental/Arial Bold.ttf", 0),
        face("/Library/Fonts/Arial Bold.ttf", 0),
        // Linux
        face("/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf", 0),
        face("/usr/share/fonts/TTF/DejaVuSans-Bold.ttf", 0),
        face("/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf", 0),
        face("/usr/share/fonts/dejavu-sans-fonts/DejaVuSans-Bold.ttf", 0),
        face("/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf", 0),
        face("/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf", 0),
        face("/usr/share/fonts/truetype/noto/NotoSans-Bold.ttf", 0),
        face("/usr/share/fonts/truetype/freefont/FreeSansBold.ttf", 0),
        // Windows
        face("C:\\Windows\\Fonts\\arialbd.ttf", 0),
        face("C:\\Windows\\Fonts\\segoeuib.ttf", 0),
    ];
}

pub mod output {
    /// Sizes written in full mode
    pub const ICON_SIZES: [u32; 7] = [16, 32, 64, 128, 256, 512, 1024];

    /// Asset catalog for the app bundle, relative to the project root
    pub const APPICONSET_DIR: &str = "Sources/jjstats/Assets.xcassets/AppIcon.appiconset";

    /// Layer assets consumed by Icon Composer, relative to the project root
    pub const FOREGROUND_DIR: &str = "Sources/jjstats/AppIcon.icon/Assets";

    pub const FOREGROUND_FILE: &str = "appicon_foreground.png";
}
