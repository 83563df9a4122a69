//! Theme and Colors
//!
//! FinFund's brand palette. The score tier colours come straight from
//! [`ScoreTier::rgb`] so the terminal and any other host agree.

use ratatui::style::Color;

use disclosure_core::ScoreTier;

// ============================================================================
// Brand Palette
// ============================================================================

/// FinFund violet, also the Primary tier colour
pub const BRAND_PRIMARY: Color = Color::Rgb(126, 62, 255);

/// Lighter violet for accents on dark backgrounds
pub const BRAND_ACCENT: Color = Color::Rgb(167, 125, 255);

/// Body text
pub const TEXT: Color = Color::Rgb(230, 230, 235);

/// Hints, placeholders and the status bar
pub const DIM_GRAY: Color = Color::Rgb(110, 110, 120);

/// Sensitive-info warning
pub const WARNING_AMBER: Color = Color::Rgb(245, 158, 11);

// ============================================================================
// Tier Colors
// ============================================================================

/// Gauge colour for a score tier
pub fn tier_color(tier: ScoreTier) -> Color {
    let (r, g, b) = tier.rgb();
    Color::Rgb(r, g, b)
}
