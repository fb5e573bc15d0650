pub mod consts {
    /// Contours enclosing less area than this are ignored when looking for
    /// the rectangular outline of a receipt.
    pub const MIN_RECEIPT_CONTOUR_AREA: f64 = 1000.0;

    /// Polygon approximation tolerance as a fraction of the contour perimeter.
    pub const POLY_APPROX_EPSILON: f64 = 0.02;

    /// Pixels darker than this count as ink when estimating text density.
    pub const INK_INTENSITY_THRESHOLD: f64 = 128.0;

    /// Accept a frame on density alone when more than this fraction of its
    /// pixels is ink-dark. Deliberately permissive: weak candidates get
    /// filtered by text confidence downstream, not here.
    pub const TEXT_DENSITY_THRESHOLD: f64 = 0.1;

    /// Minimum contour area for the pixel-only fallback to count a region
    /// as text-like.
    pub const MIN_TEXT_REGION_AREA: f64 = 100.0;

    pub const DEFAULT_MAX_FRAMES: usize = 100;
    pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.7;

    /// Video container extensions the pipeline will open.
    pub const SUPPORTED_FORMATS: [&str; 6] = ["mp4", "avi", "mov", "mkv", "wmv", "flv"];

    /// Currency symbols in match-priority order, with their ISO-style codes.
    pub const CURRENCY_SYMBOLS: [(char, &str); 5] = [
        ('$', "USD"),
        ('€', "EUR"),
        ('£', "GBP"),
        ('₹', "INR"),
        ('¥', "JPY"),
    ];

    /// Vocabulary that makes a text fragment look receipt-like.
    pub const RECEIPT_WORDS: [&str; 6] =
        ["total", "subtotal", "tax", "receipt", "amount", "payment"];

    /// Payment keywords in match-priority order.
    pub const PAYMENT_METHODS: [&str; 6] = ["cash", "credit", "debit", "card", "check", "mobile"];
}

pub mod confidence;
pub mod frame_classifier;
pub mod ocr;
pub mod pipeline;
pub mod receipt_parser;
pub mod text_merge;
pub mod video_source;
