use ratatui::layout::Rect;

pub fn centered_rect_with_percentage(percent_x: u16, percent_y: u16, cols: u16, rows: u16) -> Rect {
    let width = cols * percent_x / 100;
    let height = std::cmp::min(std::cmp::max(rows * percent_y / 100, 5), rows);
    Rect::new((cols - width) / 2, (rows - height) / 2, width, height)
}

pub fn centered_rect(width: u16, height: u16, cols: u16, rows: u16) -> Rect {
    // Ensure we don't try to create a rect larger than available space
    let actual_width = std::cmp::min(width, cols);
    let actual_height = std::cmp::min(height, rows);

    // Safely calculate center position, avoiding underflow
    let x = if cols >= actual_width {
        (cols - actual_width) / 2
    } else {
        0
    };
    let y = if rows >= actual_height {
        (rows - actual_height) / 2
    } else {
        0
    };

    Rect::new(x, y, actual_width, actual_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_fits_inside_available_space() {
        let rect = centered_rect(200, 50, 80, 24);
        assert_eq!(rect.width, 80, "Width should be capped to the terminal");
        assert_eq!(rect.height, 24, "Height should be capped to the terminal");
        assert_eq!(rect.x, 0);
        assert_eq!(rect.y, 0);
    }

    #[test]
    fn centered_rect_is_centered() {
        let rect = centered_rect(40, 10, 80, 30);
        assert_eq!(rect.x, 20);
        assert_eq!(rect.y, 10);
    }
}
