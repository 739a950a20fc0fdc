use std::fs;
use std::path::Path;
use std::sync::Arc;

use likeness::{
    Compositor, CompositorOpts, FixedAdvanceText, PreparedImage, RenderOutcome, ResultPayload,
};

fn gradient_photo(w: u32, h: u32) -> PreparedImage {
    let mut px = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            px.extend_from_slice(&[
                (80 + x * 120 / w) as u8,
                (60 + y * 100 / h) as u8,
                140,
                255,
            ]);
        }
    }
    PreparedImage {
        width: w,
        height: h,
        rgba8_premul: Arc::new(px),
    }
}

fn main() -> anyhow::Result<()> {
    let json = r#"
{
  "success": true,
  "analysisResults": [
    { "part": "眉毛", "similarTo": "Father", "similarityScore": 78, "description": "眉形浓密平直，眉尾略微上扬。" },
    { "part": "眼睛", "similarTo": "Mother", "similarityScore": 85, "description": "双眼皮明显，眼型偏圆。" },
    { "part": "鼻子", "similarTo": "Father", "similarityScore": 70, "description": "鼻梁高挺。" },
    { "part": "嘴巴", "similarTo": "Mother", "similarityScore": 66, "description": "唇形饱满。" },
    { "part": "总结", "similarTo": "Father", "similarityScore": 64, "description": "整体轮廓更像爸爸，五官细节更像妈妈。" }
  ],
  "faceCenter": { "x": 50, "y": 42 }
}
"#;
    let payload = ResultPayload::from_json_str(json)?;

    let opts = CompositorOpts::default()
        .with_device_pixel_ratio(2.0)
        .with_debug_anchor(true);
    let mut compositor = Compositor::new(FixedAdvanceText::default(), opts)?;
    compositor.set_image(gradient_photo(300, 380))?;
    compositor.set_result(payload)?;

    let out_dir = Path::new("target/likeness_examples");
    fs::create_dir_all(out_dir)?;

    for width in [360.0, 430.0] {
        let outcome = compositor.set_available_width(width)?;
        if let RenderOutcome::Drawn(summary) = outcome {
            eprintln!(
                "{width}px: {}x{} device pixels, {} cards",
                summary.pixel_size.0, summary.pixel_size.1, summary.cards
            );
        }
        let surface = compositor
            .surface()
            .ok_or_else(|| anyhow::anyhow!("no surface after render"))?;
        let out_path = out_dir.join(format!("report_{width}.png"));
        fs::write(&out_path, surface.encode_png()?)?;
        eprintln!("wrote {}", out_path.display());
    }
    Ok(())
}
