use crate::workflow::CycleId;
use eframe::egui;
use image::GenericImageView;

const MAX_PREVIEW_DIMENSION: f32 = 240.0;

/// A thumbnail decoded on the runtime, tagged with the selection it belongs to.
pub struct DecodedPreview {
    pub cycle: CycleId,
    pub name: String,
    pub image: Result<egui::ColorImage, image::ImageError>,
}

/// Decodes `bytes` and scales the result to fit the preview box.
pub fn decode_thumbnail(bytes: &[u8]) -> Result<egui::ColorImage, image::ImageError> {
    let decoded = image::load_from_memory(bytes)?;

    let (orig_w, orig_h) = decoded.dimensions();
    let scale = (MAX_PREVIEW_DIMENSION / (orig_w.max(orig_h) as f32)).min(1.0);
    let resized = if scale < 1.0 {
        decoded.resize(
            (orig_w as f32 * scale).max(1.0) as u32,
            (orig_h as f32 * scale).max(1.0) as u32,
            image::imageops::FilterType::Triangle,
        )
    } else {
        decoded
    };

    let rgba = resized.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

/// Thumbnail of the selected image. The GPU texture is created on first
/// draw and freed when the preview is dropped.
pub struct Preview {
    name: String,
    size: [usize; 2],
    pending: Option<egui::ColorImage>,
    texture: Option<egui::TextureHandle>,
}

impl Preview {
    pub fn new(name: String, image: egui::ColorImage) -> Self {
        Self {
            name,
            size: image.size,
            pending: Some(image),
            texture: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> egui::Vec2 {
        egui::vec2(self.size[0] as f32, self.size[1] as f32)
    }

    pub fn texture(&mut self, ctx: &egui::Context) -> Option<&egui::TextureHandle> {
        if self.texture.is_none() {
            let image = self.pending.take()?;
            self.texture = Some(ctx.load_texture(
                format!("selected-image:{}", self.name),
                image,
                egui::TextureOptions::LINEAR,
            ));
        }
        self.texture.as_ref()
    }
}
