use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub fn popup_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    let inner = vertical[1];
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(inner.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(inner);
    horizontal[1]
}

/// Bottom-anchored rect for the slide-in overlay. A fully open overlay
/// leaves one row of the list visible at the top; mid-transition the
/// overlay occupies the bottom slice proportional to the visible
/// fraction.
pub fn slide_rect(area: Rect, visible_fraction: f32) -> Option<Rect> {
    let target_height = area.height.saturating_sub(1);
    let visible_rows = (f32::from(target_height) * visible_fraction.clamp(0.0, 1.0)).round() as u16;
    if visible_rows == 0 {
        return None;
    }
    Some(Rect {
        x: area.x,
        y: area.y + area.height - visible_rows,
        width: area.width,
        height: visible_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slide_rect_grows_from_the_bottom_edge() {
        let area = Rect::new(0, 0, 80, 41);
        assert!(slide_rect(area, 0.0).is_none());

        let half = slide_rect(area, 0.5).unwrap();
        assert_eq!(half.height, 20);
        assert_eq!(half.y + half.height, area.height);

        let full = slide_rect(area, 1.0).unwrap();
        assert_eq!(full.height, 40);
        assert_eq!(full.y, 1);
    }
}
