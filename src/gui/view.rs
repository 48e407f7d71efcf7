use super::deck::Card;
use crate::carousel::{CardSize, CardVisual, Point, Scene};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use std::f64::consts::PI;

const CORNER_RADIUS: f64 = 18.0;
const OUTLINE_WIDTH: f64 = 4.0;
const LABEL_SIZE: f64 = 18.0;
const LABEL_BAND: f64 = 48.0;

struct CardRenderer<'a> {
    card: &'a Card,
    visual: &'a CardVisual,
    size: CardSize,
}

impl<'a> CardRenderer<'a> {
    fn new(card: &'a Card, visual: &'a CardVisual, size: CardSize) -> Self {
        Self { card, visual, size }
    }

    /// Paints the card with its slot transform applied, `origin` being the
    /// position of the center slot.
    fn draw(&self, cr: &Context, origin: Point, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let slot = &self.visual.slot;

        cr.save()?;
        cr.translate(origin.x + slot.x, origin.y + slot.y);
        cr.scale(slot.scale, slot.scale);
        cr.rotate(slot.rotate_deg.to_radians());

        // composite the whole card first so overlapping parts fade together
        cr.push_group();
        self.draw_body(cr, colors)?;
        self.draw_content(cr, colors)?;
        if self.visual.is_center {
            self.draw_outline(cr, colors)?;
        }
        cr.pop_group_to_source()?;
        cr.paint_with_alpha(slot.opacity)?;

        cr.restore()
    }

    fn rounded_rect(&self, cr: &Context) {
        let (w, h, r) = (self.size.width, self.size.height, CORNER_RADIUS);
        let (x, y) = (-w / 2.0, -h / 2.0);
        cr.new_sub_path();
        cr.arc(x + w - r, y + r, r, -PI / 2.0, 0.0);
        cr.arc(x + w - r, y + h - r, r, 0.0, PI / 2.0);
        cr.arc(x + r, y + h - r, r, PI / 2.0, PI);
        cr.arc(x + r, y + r, r, PI, 3.0 * PI / 2.0);
        cr.close_path();
    }

    fn draw_body(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let fill = self
            .card
            .color
            .map(|c| Srgba::from(c.to_f64()))
            .unwrap_or(colors.card);
        set_source(cr, fill);
        self.rounded_rect(cr);
        cr.fill()
    }

    fn draw_content(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        if let Some(pixbuf) = &self.card.pixbuf {
            self.draw_image(cr, pixbuf)?;
        }
        self.draw_label(cr, colors)
    }

    fn draw_image(&self, cr: &Context, pixbuf: &Pixbuf) -> Result<(), cairo::Error> {
        let (pw, ph) = (pixbuf.width() as f64, pixbuf.height() as f64);
        if pw <= 0.0 || ph <= 0.0 {
            return Ok(());
        }
        // cover the card, cropping the overflow
        let image_scale = (self.size.width / pw).max(self.size.height / ph);

        cr.save()?;
        self.rounded_rect(cr);
        cr.clip();
        cr.scale(image_scale, image_scale);
        cr.set_source_pixbuf(pixbuf, -pw / 2.0, -ph / 2.0);
        cr.paint()?;
        cr.restore()
    }

    fn draw_label(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let (w, h) = (self.size.width, self.size.height);
        let text = self.card.label.as_str();

        cr.save()?;
        self.rounded_rect(cr);
        cr.clip();
        set_source(cr, colors.label_shade);
        cr.rectangle(-w / 2.0, h / 2.0 - LABEL_BAND, w, LABEL_BAND);
        cr.fill()?;
        cr.restore()?;

        set_source(cr, colors.label);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(LABEL_SIZE);
        if let Ok(ext) = cr.text_extents(text) {
            cr.move_to(
                -ext.width() / 2.0 - ext.x_bearing(),
                h / 2.0 - LABEL_BAND / 2.0 + ext.height() / 2.0,
            );
            cr.show_text(text)?;
        }
        Ok(())
    }

    fn draw_outline(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        set_source(cr, colors.center_outline);
        cr.set_line_width(OUTLINE_WIDTH);
        self.rounded_rect(cr);
        cr.stroke()
    }
}

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

pub fn draw(
    cr: &Context,
    scene: &Scene,
    cards: &[Card],
    origin: Point,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    for (i, visual) in scene.paint_order() {
        if let Some(card) = cards.get(i) {
            CardRenderer::new(card, &visual, CardSize::default()).draw(cr, origin, colors)?;
        }
    }
    Ok(())
}
