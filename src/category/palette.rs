//! The fixed palettes categories pick their display icon and color from.

/// The icon glyphs available in the category form.
pub const CATEGORY_ICONS: &[&str] = &[
    // Food & drinks
    "🍔", "🍽️", "☕", "🍕", "🍦", "🍎", "🥗", "🍜", "🛒",
    // Transportation
    "⛽", "🚗", "🚌", "🚇", "🚲", "✈️",
    // Shopping & fashion
    "🛍️", "👕", "👟", "👜", "💄",
    // Home & utilities
    "🏠", "⚡", "💧", "📱", "📶", "🔧",
    // Entertainment
    "🎬", "🎮", "🎵", "📚", "🎭", "⚽",
    // Health
    "💊", "🏥", "🦷", "🏋️",
    // Money & work
    "💰", "💵", "💳", "🏦", "📈", "💻", "🎓", "🎁",
];

/// The color tokens available in the category form.
pub const CATEGORY_COLORS: &[&str] = &[
    "bg-red-500",
    "bg-orange-500",
    "bg-amber-500",
    "bg-yellow-500",
    "bg-lime-500",
    "bg-green-500",
    "bg-emerald-500",
    "bg-teal-500",
    "bg-cyan-500",
    "bg-blue-500",
    "bg-indigo-500",
    "bg-purple-500",
    "bg-pink-500",
    "bg-rose-500",
    "bg-gray-500",
];

/// The badge color used for transactions without a category.
pub const UNCATEGORIZED_COLOR: &str = "bg-gray-400";

/// The badge icon used for transactions without a category.
pub const UNCATEGORIZED_ICON: &str = "💰";

/// The label used for transactions without a category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";
