use anyhow::Context;

/// Decoded equirectangular photo, RGBA8 rows top to bottom.
pub struct PanoramaImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Decode JPEG/PNG/WebP bytes, shrinking to fit `max_dim` on the longer side.
pub fn decode_panorama(bytes: &[u8], max_dim: u32) -> anyhow::Result<PanoramaImage> {
    let mut img = image::load_from_memory(bytes).context("decode panorama")?;
    let (w, h) = (img.width(), img.height());
    if w == 0 || h == 0 {
        anyhow::bail!("empty panorama image");
    }
    if w > max_dim || h > max_dim {
        log::warn!(
            "[panorama] {}x{} exceeds max texture size {}, downscaling",
            w,
            h,
            max_dim
        );
        img = img.resize(max_dim, max_dim, image::imageops::FilterType::Triangle);
    }
    let rgba = img.to_rgba8();
    Ok(PanoramaImage {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

pub(crate) fn create_panorama_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    img: &PanoramaImage,
) -> (wgpu::Texture, wgpu::TextureView) {
    let size = wgpu::Extent3d {
        width: img.width,
        height: img.height,
        depth_or_array_layers: 1,
    };
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &tex,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &img.rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * img.width),
            rows_per_image: Some(img.height),
        },
        size,
    );
    let view = tex.create_view(&wgpu::TextureViewDescriptor::default());
    (tex, view)
}

/// 1x1 stand-in bound until the first panorama arrives.
pub(crate) fn placeholder_image() -> PanoramaImage {
    PanoramaImage {
        width: 1,
        height: 1,
        rgba: vec![29, 26, 21, 255],
    }
}
