//! Rendering seam: draw backend traits, opaque resource handles, and the
//! per-frame draw context
//!
//! The engine never talks to a GPU or audio device. It stores opaque
//! handles, applies the camera offset, and forwards immediate-mode draw
//! calls to a [`DrawBackend`]. A failed draw call is logged and ignored:
//! rendering failures are never fatal to simulation continuity.

pub mod animation;

pub use animation::{AnimationFrame, SpriteAnimation};

use crate::foundation::math::{Point2, Rect, Vec2};
use thiserror::Error;

/// Opaque identifier for a loaded texture.
///
/// The default value is [`TextureHandle::INVALID`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(u32);

impl TextureHandle {
    /// Handle value that never refers to a loaded texture
    pub const INVALID: Self = Self(0);

    /// Wrap a backend-assigned raw id
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Whether this handle may refer to a loaded texture
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

/// Opaque identifier for a loaded audio clip.
///
/// The default value is [`AudioHandle::INVALID`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AudioHandle(u32);

impl AudioHandle {
    /// Handle value that never refers to a loaded clip
    pub const INVALID: Self = Self(0);

    /// Wrap a backend-assigned raw id
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Whether this handle may refer to a loaded clip
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

/// RGBA tint applied to a draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Color {
    /// Opaque white (no tint)
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Fully opaque color from RGB channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Destination transform for a sprite draw call
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteParams {
    /// Top-left destination position in screen coordinates
    pub position: Point2,
    /// Rotation in radians around the pivot
    pub rotation: f32,
    /// Pivot offset from the top-left corner, in texture pixels
    pub pivot: Vec2,
    /// Per-axis scale factors
    pub scale: Vec2,
    /// Tint and alpha
    pub tint: Color,
    /// Sub-region of the texture to draw, full texture when `None`
    pub source: Option<Rect>,
}

impl SpriteParams {
    /// Untransformed draw at the given position
    pub fn at(position: Point2) -> Self {
        Self {
            position,
            rotation: 0.0,
            pivot: Vec2::new(0.0, 0.0),
            scale: Vec2::new(1.0, 1.0),
            tint: Color::WHITE,
            source: None,
        }
    }

    /// Set the rotation and its pivot offset
    pub fn rotated(mut self, rotation: f32, pivot: Vec2) -> Self {
        self.rotation = rotation;
        self.pivot = pivot;
        self
    }

    /// Set the source sub-rectangle for sprite-sheet frames
    pub fn with_source(mut self, source: Rect) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the tint color
    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }
}

/// A draw call was rejected by the platform layer
#[derive(Error, Debug)]
pub enum DrawError {
    /// The texture handle does not refer to a loaded texture
    #[error("invalid texture handle")]
    InvalidTexture,

    /// The platform layer failed internally
    #[error("draw backend failure: {0}")]
    Backend(String),
}

/// Resource loading failed in the platform layer
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The asset does not exist
    #[error("asset not found: {0}")]
    NotFound(String),

    /// Filesystem failure while reading the asset
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The platform layer failed internally
    #[error("resource backend failure: {0}")]
    Backend(String),
}

/// Immediate-mode draw interface implemented by the platform layer
pub trait DrawBackend {
    /// Draw a textured sprite
    fn draw_sprite(&mut self, texture: TextureHandle, params: &SpriteParams)
        -> Result<(), DrawError>;

    /// Draw an untextured filled rectangle (debug overlays, solid fills)
    fn draw_rect(&mut self, rect: Rect, color: Color) -> Result<(), DrawError>;
}

/// Asset loading interface implemented by the platform layer.
///
/// Handles returned here are opaque: the engine stores and forwards them,
/// never inspects them.
pub trait ResourceLoader {
    /// Load a texture and return its handle
    fn load_texture(&mut self, path: &str) -> Result<TextureHandle, ResourceError>;

    /// Release a previously loaded texture
    fn unload_texture(&mut self, handle: TextureHandle);

    /// Load an audio clip and return its handle
    fn load_audio(&mut self, path: &str) -> Result<AudioHandle, ResourceError>;

    /// Release a previously loaded clip
    fn unload_audio(&mut self, handle: AudioHandle);
}

/// Per-frame draw context handed to entity render calls.
///
/// Applies the camera offset to world-space draws and absorbs backend
/// failures: a rejected call is logged at `warn` and the frame continues.
pub struct RenderFrame<'a> {
    backend: &'a mut dyn DrawBackend,
    camera: Point2,
}

impl<'a> RenderFrame<'a> {
    /// Create a frame rendering through `backend` with the camera at
    /// `camera` (world coordinates of the screen's top-left corner)
    pub fn new(backend: &'a mut dyn DrawBackend, camera: Point2) -> Self {
        Self { backend, camera }
    }

    /// World position of the screen's top-left corner
    pub fn camera(&self) -> Point2 {
        self.camera
    }

    /// Draw a sprite at world coordinates
    pub fn draw_sprite(&mut self, texture: TextureHandle, params: &SpriteParams) {
        let mut screen = params.clone();
        screen.position -= self.camera.coords;
        if let Err(err) = self.backend.draw_sprite(texture, &screen) {
            log::warn!("sprite draw failed, continuing frame: {err}");
        }
    }

    /// Draw a filled rectangle at world coordinates
    pub fn draw_rect(&mut self, rect: Rect, color: Color) {
        let screen = rect.offset(-self.camera.coords);
        if let Err(err) = self.backend.draw_rect(screen, color) {
            log::warn!("rect draw failed, continuing frame: {err}");
        }
    }
}

/// A draw call recorded by the [`HeadlessBackend`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    /// A sprite draw
    Sprite {
        /// Texture that was drawn
        texture: TextureHandle,
        /// Final (camera-adjusted) parameters
        params: SpriteParams,
    },
    /// A filled rectangle draw
    Rect {
        /// Final (camera-adjusted) rectangle
        rect: Rect,
        /// Fill color
        color: Color,
    },
}

/// Backend that records draw calls instead of displaying them.
///
/// Used for headless development runs and for asserting on render output in
/// tests. Also hands out sequential resource handles so asset-loading code
/// paths run unchanged.
#[derive(Default)]
pub struct HeadlessBackend {
    calls: Vec<DrawCall>,
    next_handle: u32,
    loaded: Vec<String>,
}

impl HeadlessBackend {
    /// Create an empty recording backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls recorded so far, in submission order
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Forget recorded calls (typically between frames)
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Paths of every asset loaded through this backend
    pub fn loaded_assets(&self) -> &[String] {
        &self.loaded
    }

    fn next_raw(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl DrawBackend for HeadlessBackend {
    fn draw_sprite(
        &mut self,
        texture: TextureHandle,
        params: &SpriteParams,
    ) -> Result<(), DrawError> {
        if !texture.is_valid() {
            return Err(DrawError::InvalidTexture);
        }
        self.calls.push(DrawCall::Sprite {
            texture,
            params: params.clone(),
        });
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) -> Result<(), DrawError> {
        self.calls.push(DrawCall::Rect { rect, color });
        Ok(())
    }
}

impl ResourceLoader for HeadlessBackend {
    fn load_texture(&mut self, path: &str) -> Result<TextureHandle, ResourceError> {
        self.loaded.push(path.to_string());
        Ok(TextureHandle::new(self.next_raw()))
    }

    fn unload_texture(&mut self, _handle: TextureHandle) {}

    fn load_audio(&mut self, path: &str) -> Result<AudioHandle, ResourceError> {
        self.loaded.push(path.to_string());
        Ok(AudioHandle::new(self.next_raw()))
    }

    fn unload_audio(&mut self, _handle: AudioHandle) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_applies_camera_offset() {
        let mut backend = HeadlessBackend::new();
        let texture = backend.load_texture("ship.png").unwrap();

        let mut frame = RenderFrame::new(&mut backend, Point2::new(100.0, 50.0));
        frame.draw_sprite(texture, &SpriteParams::at(Point2::new(150.0, 75.0)));
        drop(frame);

        match &backend.calls()[0] {
            DrawCall::Sprite { params, .. } => {
                assert_eq!(params.position, Point2::new(50.0, 25.0));
            }
            other => panic!("unexpected call: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_texture_draw_is_absorbed() {
        let mut backend = HeadlessBackend::new();
        let mut frame = RenderFrame::new(&mut backend, Point2::new(0.0, 0.0));
        // Must not panic; the failure is logged and the frame continues.
        frame.draw_sprite(TextureHandle::INVALID, &SpriteParams::at(Point2::new(0.0, 0.0)));
        drop(frame);
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_default_handles_are_invalid() {
        assert_eq!(TextureHandle::default(), TextureHandle::INVALID);
        assert_eq!(AudioHandle::default(), AudioHandle::INVALID);
        assert!(!TextureHandle::default().is_valid());
    }

    #[test]
    fn test_audio_clips_load_like_textures() {
        let mut backend = HeadlessBackend::new();
        let clip = backend.load_audio("impact.ogg").unwrap();
        assert!(clip.is_valid());
        assert_eq!(backend.loaded_assets(), ["impact.ogg"]);
        backend.unload_audio(clip);
    }

    #[test]
    fn test_headless_handles_are_sequential_and_valid() {
        let mut backend = HeadlessBackend::new();
        let a = backend.load_texture("a.png").unwrap();
        let b = backend.load_texture("b.png").unwrap();
        assert!(a.is_valid());
        assert!(b.is_valid());
        assert_ne!(a, b);
        assert_eq!(backend.loaded_assets(), ["a.png", "b.png"]);
    }
}
