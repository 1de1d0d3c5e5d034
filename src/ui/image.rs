//! Raster images drawn with Unicode `▀` half-blocks (2 pixels per cell).

use image::imageops::FilterType;
use image::RgbaImage;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Style},
};

use super::theme::{fade, grayscale, Theme};

/// How to draw one image.
#[derive(Debug, Clone, Copy)]
pub struct ImageStyle {
    /// Page colour behind transparent pixels.
    pub bg: Color,
    pub grayscale: bool,
    /// Fit inside the area (letterbox) or fill it (crop).
    pub cover: bool,
}

impl Default for ImageStyle {
    fn default() -> Self {
        Self {
            bg: Theme::PAGE_BG,
            grayscale: false,
            cover: false,
        }
    }
}

/// Draw `img` into `area`.  Each column is 1 pixel wide and each row 2
/// pixels tall; the image is centred and keeps its aspect ratio.
pub fn render_halfblocks(img: &RgbaImage, area: Rect, buf: &mut Buffer, style: ImageStyle) {
    let area = area.intersection(buf.area);
    if area.is_empty() || img.width() == 0 || img.height() == 0 {
        return;
    }

    let max_px_w = f64::from(area.width);
    let max_px_h = f64::from(area.height) * 2.0;
    let src_w = f64::from(img.width());
    let src_h = f64::from(img.height());

    let (sx, sy) = (max_px_w / src_w, max_px_h / src_h);
    let scale = if style.cover { sx.max(sy) } else { sx.min(sy) };
    let fit_w = (src_w * scale).round().max(1.0) as u32;
    let fit_h = (src_h * scale).round().max(1.0) as u32;
    let rgba = image::imageops::resize(img, fit_w, fit_h, FilterType::Triangle);

    // Crop offset (cover) or centring offset (contain), in pixels / cells.
    let crop_x = fit_w.saturating_sub(u32::from(area.width)) / 2;
    let crop_y = fit_h.saturating_sub(u32::from(area.height) * 2) / 2;
    let col_offset = (u32::from(area.width).saturating_sub(fit_w) / 2) as u16;
    let row_offset = ((u32::from(area.height) * 2).saturating_sub(fit_h) / 4) as u16;

    let pixel = |x: u32, y: u32| -> Option<Color> {
        if x >= rgba.width() || y >= rgba.height() {
            return None;
        }
        let p = rgba.get_pixel(x, y);
        let c = if style.grayscale {
            grayscale(p[0], p[1], p[2])
        } else {
            Color::Rgb(p[0], p[1], p[2])
        };
        Some(fade(c, style.bg, f64::from(p[3]) / 255.0))
    };

    for row in 0..area.height.saturating_sub(row_offset) {
        let yt = crop_y + u32::from(row) * 2;
        if yt >= rgba.height() {
            break;
        }
        for col in 0..area.width.saturating_sub(col_offset) {
            let x = crop_x + u32::from(col);
            let Some(top) = pixel(x, yt) else {
                break;
            };
            let bottom = pixel(x, yt + 1).unwrap_or(style.bg);
            let pos = Position::new(area.x + col_offset + col, area.y + row_offset + row);
            if let Some(cell) = buf.cell_mut(pos) {
                cell.set_char('▀').set_fg(top).set_bg(bottom);
            }
        }
    }
}

/// Frame shown while an image is loading or when it failed to load.
pub fn render_placeholder(area: Rect, buf: &mut Buffer, label: &str, bg: Color) {
    let area = area.intersection(buf.area);
    if area.is_empty() {
        return;
    }
    let shade = fade(Theme::MUTED, bg, 0.15);
    buf.set_style(area, Style::default().bg(shade));
    let w = label.chars().count() as u16;
    if area.width > w && area.height > 0 {
        let x = area.x + (area.width - w) / 2;
        let y = area.y + area.height / 2;
        buf.set_string(x, y, label, Style::default().fg(Theme::MUTED).bg(shade));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn solid_image_fills_cells() {
        let img = RgbaImage::from_pixel(4, 8, Rgba([200, 10, 10, 255]));
        let area = Rect::new(0, 0, 4, 4);
        let mut buf = Buffer::empty(area);
        render_halfblocks(&img, area, &mut buf, ImageStyle::default());

        let cell = buf.cell(Position::new(1, 1)).unwrap();
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, Color::Rgb(200, 10, 10));
        assert_eq!(cell.bg, Color::Rgb(200, 10, 10));
    }

    #[test]
    fn grayscale_option() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        let style = ImageStyle {
            grayscale: true,
            ..ImageStyle::default()
        };
        render_halfblocks(&img, area, &mut buf, style);
        assert_eq!(buf.cell(Position::new(0, 0)).unwrap().fg, Color::Rgb(76, 76, 76));
    }

    #[test]
    fn placeholder_centres_label() {
        let area = Rect::new(0, 0, 11, 3);
        let mut buf = Buffer::empty(area);
        render_placeholder(area, &mut buf, "img", Theme::PAGE_BG);
        assert_eq!(buf.cell(Position::new(4, 1)).unwrap().symbol(), "i");
    }
}
