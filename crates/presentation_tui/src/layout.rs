//! Anchor math for the widget surfaces.
//!
//! Pure `Rect` arithmetic so placement stays testable without a
//! terminal. All anchors keep [`MARGIN`] cells of breathing room from
//! the host edge and clamp to the host area on small surfaces.

use domain::WidgetPosition;
use ratatui::layout::Rect;

/// Chat panel size in cells.
pub const PANEL_WIDTH: u16 = 46;
/// Chat panel height in rows.
pub const PANEL_HEIGHT: u16 = 18;
/// Height of the header-only bar shown while minimized.
pub const MINIMIZED_HEIGHT: u16 = 3;
/// Launcher affordance size in cells.
pub const LAUNCHER_WIDTH: u16 = 7;
/// Launcher affordance height in rows.
pub const LAUNCHER_HEIGHT: u16 = 3;
/// Gap kept between the widget and the host edge.
pub const MARGIN: u16 = 2;

/// Where the full chat panel is drawn inside the host area.
#[must_use]
pub fn panel_rect(area: Rect, position: WidgetPosition) -> Rect {
    anchored(area, position, PANEL_WIDTH, PANEL_HEIGHT)
}

/// Where the header-only bar is drawn while minimized.
#[must_use]
pub fn minimized_rect(area: Rect, position: WidgetPosition) -> Rect {
    anchored(area, position, PANEL_WIDTH, MINIMIZED_HEIGHT)
}

/// Where the launcher affordance is drawn while closed.
#[must_use]
pub fn launcher_rect(area: Rect, position: WidgetPosition) -> Rect {
    anchored(area, position, LAUNCHER_WIDTH, LAUNCHER_HEIGHT)
}

fn anchored(area: Rect, position: WidgetPosition, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let slack_x = area.width - width;
    let slack_y = area.height - height;

    let dx = if position.is_center() {
        slack_x / 2
    } else if position.is_left() {
        MARGIN.min(slack_x)
    } else {
        slack_x.saturating_sub(MARGIN)
    };

    let dy = if position.is_center() {
        slack_y / 2
    } else if position.is_top() {
        MARGIN.min(slack_y)
    } else {
        slack_y.saturating_sub(MARGIN)
    };

    Rect {
        x: area.x + dx,
        y: area.y + dy,
        width,
        height,
    }
}
