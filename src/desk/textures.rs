//! Procedurally painted textures.
//!
//! There is no font rasterizer in the stack, so editor text is painted as
//! one solid block per whitespace-separated token. At screen distance this
//! reads as syntax-highlighted code.

use image::{Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::resources::Texture;
use crate::utils::color::hex_to_rgba8;

pub const CODE_TEXTURE_SIZE: u32 = 1024;
pub const FABRIC_TEXTURE_SIZE: u32 = 512;

const CODE_AREA_X: i32 = 60;
const CODE_AREA_Y: i32 = 50;
const LINE_HEIGHT: i32 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeStyle {
    Keyword,
    Type,
    String,
    Comment,
    Variable,
    Function,
    Number,
    Operator,
    Punctuation,
}

impl CodeStyle {
    #[must_use]
    pub fn color(self) -> u32 {
        match self {
            Self::Keyword => 0x56_9CD6,
            Self::Type => 0x4E_C9B0,
            Self::String => 0xCE_9178,
            Self::Comment => 0x6A_9955,
            Self::Variable => 0x9C_DCFE,
            Self::Function => 0xDC_DCAA,
            Self::Number => 0xB5_CEA8,
            Self::Operator | Self::Punctuation => 0xD4_D4D4,
        }
    }
}

/// The source shown on the monitor, one style per line.
pub const CODE_LINES: &[(&str, CodeStyle)] = &[
    ("// 3D Scene Initialization", CodeStyle::Comment),
    ("import * as THREE from \"three\";", CodeStyle::Keyword),
    ("", CodeStyle::Punctuation),
    ("class SceneManager {", CodeStyle::Keyword),
    ("  constructor() {", CodeStyle::Keyword),
    ("    this.scene = new THREE.Scene();", CodeStyle::Variable),
    ("    this.renderer = null;", CodeStyle::Variable),
    ("    this.camera = null;", CodeStyle::Variable),
    ("    this.init();", CodeStyle::Function),
    ("  }", CodeStyle::Punctuation),
    ("", CodeStyle::Punctuation),
    ("  init() {", CodeStyle::Function),
    ("    // Initialize renderer", CodeStyle::Comment),
    ("    this.renderer = new THREE.WebGLRenderer({", CodeStyle::Variable),
    ("      antialias: true,", CodeStyle::Variable),
    ("      alpha: true", CodeStyle::Variable),
    ("    });", CodeStyle::Punctuation),
    ("", CodeStyle::Punctuation),
    ("    this.renderer.setSize(window.innerWidth, window.innerHeight);", CodeStyle::Function),
    ("    this.renderer.setPixelRatio(window.devicePixelRatio);", CodeStyle::Function),
    ("", CodeStyle::Punctuation),
    ("    // Create camera", CodeStyle::Comment),
    ("    this.camera = new THREE.PerspectiveCamera(", CodeStyle::Variable),
    ("      70,", CodeStyle::Number),
    ("      window.innerWidth / window.innerHeight,", CodeStyle::Operator),
    ("      0.1,", CodeStyle::Number),
    ("      1000", CodeStyle::Number),
    ("    );", CodeStyle::Punctuation),
    ("    this.camera.position.set(0, 1.2, 2.0);", CodeStyle::Variable),
    ("", CodeStyle::Punctuation),
    ("    // Add lights", CodeStyle::Comment),
    ("    const ambientLight = new THREE.AmbientLight(0xffffff, 0.5);", CodeStyle::Variable),
    ("    this.scene.add(ambientLight);", CodeStyle::Function),
    ("", CodeStyle::Punctuation),
    ("    const pointLight = new THREE.PointLight(0x2563eb, 1, 10);", CodeStyle::Variable),
    ("    pointLight.position.set(0, 2, 2);", CodeStyle::Variable),
    ("    this.scene.add(pointLight);", CodeStyle::Function),
    ("", CodeStyle::Punctuation),
    ("    // Create 3D objects", CodeStyle::Comment),
    ("    this.createObjects();", CodeStyle::Function),
    ("  }", CodeStyle::Punctuation),
    ("", CodeStyle::Punctuation),
    ("  animate() {", CodeStyle::Function),
    ("    requestAnimationFrame(this.animate.bind(this));", CodeStyle::Function),
    ("    this.renderer.render(this.scene, this.camera);", CodeStyle::Function),
    ("  }", CodeStyle::Punctuation),
    ("}", CodeStyle::Punctuation),
];

// ============================================================================
// Painting primitives
// ============================================================================

/// Fills a rectangle, clipped to the image.
pub fn fill_rect(img: &mut RgbaImage, x: i32, y: i32, w: i32, h: i32, color: [u8; 4]) {
    let (iw, ih) = (img.width() as i32, img.height() as i32);
    for py in y.max(0)..(y + h).min(ih) {
        for px in x.max(0)..(x + w).min(iw) {
            img.put_pixel(px as u32, py as u32, Rgba(color));
        }
    }
}

/// Alpha-blends `rgb` over a rectangle.
pub fn blend_rect(img: &mut RgbaImage, x: i32, y: i32, w: i32, h: i32, rgb: [u8; 3], alpha: f32) {
    let (iw, ih) = (img.width() as i32, img.height() as i32);
    let a = alpha.clamp(0.0, 1.0);
    for py in y.max(0)..(y + h).min(ih) {
        for px in x.max(0)..(x + w).min(iw) {
            let p = img.get_pixel_mut(px as u32, py as u32);
            for c in 0..3 {
                let dst = f32::from(p.0[c]);
                p.0[c] = (dst + (f32::from(rgb[c]) - dst) * a).round() as u8;
            }
        }
    }
}

/// Paints `text` as token blocks starting at `x` with the given baseline.
pub fn paint_text(img: &mut RgbaImage, text: &str, x: i32, baseline: i32, font_px: f32, color: u32) {
    let advance = font_px * 0.6;
    let glyph_height = (font_px * 0.7).round() as i32;
    let rgba = hex_to_rgba8(color);

    let mut run_start: Option<usize> = None;
    let chars: Vec<char> = text.chars().collect();
    for i in 0..=chars.len() {
        let is_ink = chars.get(i).is_some_and(|c| !c.is_whitespace());
        match (is_ink, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                let x0 = x + (start as f32 * advance).round() as i32;
                let width = ((i - start) as f32 * advance).round() as i32 - 1;
                fill_rect(img, x0, baseline - glyph_height, width.max(1), glyph_height, rgba);
                run_start = None;
            }
            _ => {}
        }
    }
}

// ============================================================================
// Textures
// ============================================================================

/// Dark code editor: tab bar, file sidebar, status bar, gutter, highlighted
/// code, a cursor and a selection.
#[must_use]
pub fn paint_code_editor() -> RgbaImage {
    let size = CODE_TEXTURE_SIZE as i32;
    let mut img = RgbaImage::from_pixel(CODE_TEXTURE_SIZE, CODE_TEXTURE_SIZE, Rgba(hex_to_rgba8(0x1E_1E1E)));

    fill_rect(&mut img, 0, 0, size, 40, hex_to_rgba8(0x25_2526));

    let mut tab_x = 10;
    for (i, tab) in ["index.js", "app.js", "styles.css"].iter().enumerate() {
        let bg = if i == 0 { 0x1E_1E1E } else { 0x2D_2D2D };
        fill_rect(&mut img, tab_x, 0, 120, 40, hex_to_rgba8(bg));
        paint_text(&mut img, tab, tab_x + 10, 25, 14.0, 0xCC_CCCC);
        tab_x += 122;
    }

    fill_rect(&mut img, 0, 40, 50, size - 40, hex_to_rgba8(0x25_2526));
    for (y, color) in [(70, 0x60_8B4E), (110, 0xCC_CCCC), (150, 0xCC_CCCC), (190, 0x4E_C9B0)] {
        fill_rect(&mut img, 15, y, 20, 20, hex_to_rgba8(color));
    }

    fill_rect(&mut img, 0, size - 25, size, 25, hex_to_rgba8(0x00_7ACC));
    paint_text(&mut img, "JavaScript • Line 42 • UTF-8", 10, size - 10, 12.0, 0xFF_FFFF);

    for i in 1..=45 {
        paint_text(&mut img, &i.to_string(), 55, CODE_AREA_Y + i * LINE_HEIGHT, 13.0, 0x85_8585);
    }

    for (i, (text, style)) in CODE_LINES.iter().enumerate() {
        if text.is_empty() {
            continue;
        }
        let x = if text.starts_with("  ") { CODE_AREA_X + 20 } else { CODE_AREA_X };
        let baseline = CODE_AREA_Y + (i as i32 + 1) * LINE_HEIGHT;
        paint_text(&mut img, text, x, baseline, 14.0, style.color());
    }

    fill_rect(&mut img, CODE_AREA_X + 180, CODE_AREA_Y + 7 * LINE_HEIGHT - 13, 2, 18, hex_to_rgba8(0xFF_FFFF));
    blend_rect(&mut img, CODE_AREA_X + 145, CODE_AREA_Y + 6 * LINE_HEIGHT - 13, 100, 18, [38, 79, 120], 0.5);

    img
}

#[must_use]
pub fn code_texture() -> Texture {
    Texture::new("code_editor", paint_code_editor())
}

/// Woven fabric: a fine grid of lighter threads plus per-pixel noise.
#[must_use]
pub fn paint_fabric(seed: u64) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(FABRIC_TEXTURE_SIZE, FABRIC_TEXTURE_SIZE, Rgba(hex_to_rgba8(0x22_2222)));
    let thread = Rgba(hex_to_rgba8(0x2a_2a2a));
    let spacing = 4;

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        if x % spacing == 0 || y % spacing == 0 {
            *pixel = thread;
        }
    }

    let mut rng = StdRng::seed_from_u64(seed);
    for pixel in img.pixels_mut() {
        let noise: i16 = rng.random_range(-5..5);
        for c in 0..3 {
            pixel.0[c] = (i16::from(pixel.0[c]) + noise).clamp(0, 255) as u8;
        }
    }

    img
}

/// Fabric texture tiled ten times across the seat and backrest.
#[must_use]
pub fn fabric_texture(seed: u64) -> Texture {
    Texture::new("chair_fabric", paint_fabric(seed)).with_repeat(glam::Vec2::splat(10.0))
}
