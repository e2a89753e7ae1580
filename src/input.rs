/// Last reported pointer position in window CSS pixels.
#[derive(Default, Clone, Copy)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
}

/// Normalized device coordinates for the camera offset: x right-positive,
/// y up-positive, both in [-1, 1] over the window.
#[inline]
pub fn mouse_ndc(width: f32, height: f32, mouse: &MouseState) -> [f32; 2] {
    let w = width.max(1.0);
    let h = height.max(1.0);
    [
        (mouse.x / w) * 2.0 - 1.0,
        -(mouse.y / h) * 2.0 + 1.0,
    ]
}
