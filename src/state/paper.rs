// Per-paper drag/rotate gesture state
use super::geometry::{Vec2, direction_degrees};
use super::stacking::StackOrder;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Secondary,
    Other(i16),
}

impl MouseButton {
    pub fn from_code(code: i16) -> Self {
        match code {
            0 => MouseButton::Primary,
            2 => MouseButton::Secondary,
            other => MouseButton::Other(other),
        }
    }
}

/// What the element should display: `translate(position) rotate(rotation)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaperTransform {
    pub position: Vec2,
    pub rotation: f64,
}

impl PaperTransform {
    pub fn css(&self) -> String {
        format!(
            "translateX({}px) translateY({}px) rotateZ({}deg)",
            self.position.x, self.position.y, self.rotation
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct PaperGesture {
    pub holding: bool,
    pub rotating: bool,
    /// Pointer location when the gesture started.
    pub anchor: Vec2,
    pub pointer: Vec2,
    pub prev_pointer: Vec2,
    pub velocity: Vec2,
    pub position: Vec2,
    pub rotation: f64,
    pub z_index: Option<i32>,
}

impl PaperGesture {
    pub fn new(rotation: f64) -> Self {
        Self {
            rotation,
            ..Default::default()
        }
    }

    pub fn transform(&self) -> PaperTransform {
        PaperTransform {
            position: self.position,
            rotation: self.rotation,
        }
    }

    fn grab(&mut self, stack: &StackOrder) -> i32 {
        self.holding = true;
        let z = stack.claim();
        self.z_index = Some(z);
        z
    }

    /// Returns the claimed z-index when the press picks the paper up. The
    /// press position becomes the anchor of the new gesture.
    pub fn mouse_down(
        &mut self,
        button: MouseButton,
        client: Vec2,
        stack: &StackOrder,
    ) -> Option<i32> {
        if self.holding {
            if button == MouseButton::Secondary {
                self.rotating = true;
            }
            return None;
        }
        let z = self.grab(stack);
        self.pointer = client;
        self.anchor = client;
        self.prev_pointer = client;
        if button == MouseButton::Secondary {
            self.rotating = true;
        }
        Some(z)
    }

    /// Feeds one pointer sample. Returns the transform to apply while held.
    pub fn mouse_move(&mut self, client: Vec2) -> Option<PaperTransform> {
        self.track(client)
    }

    pub fn release(&mut self) {
        self.holding = false;
        self.rotating = false;
    }

    pub fn touch_start(&mut self, touches: &[Vec2], stack: &StackOrder) -> Option<i32> {
        let first = *touches.first()?;
        let claimed = if self.holding {
            None
        } else {
            let z = self.grab(stack);
            self.pointer = first;
            self.anchor = first;
            self.prev_pointer = first;
            Some(z)
        };
        if touches.len() == 2 {
            self.rotating = true;
        }
        claimed
    }

    pub fn touch_move(&mut self, touches: &[Vec2]) -> Option<PaperTransform> {
        let first = *touches.first()?;
        let mut applied = self.track(first);
        if let [a, b] = touches {
            if self.rotating {
                if let Some(deg) = direction_degrees(*a, *b) {
                    self.rotation = deg;
                }
                if !self.holding {
                    self.position = a.midpoint(*b) - self.anchor;
                }
                applied = Some(self.transform());
            }
        }
        applied
    }

    pub fn touch_end(&mut self) {
        self.release();
    }

    fn track(&mut self, current: Vec2) -> Option<PaperTransform> {
        if !self.rotating {
            self.pointer = current;
            self.velocity = self.pointer - self.prev_pointer;
        }
        // Pointer exactly on the anchor has no direction; keep the old angle.
        if let Some(deg) = direction_degrees(self.anchor, current) {
            if self.rotating {
                self.rotation = deg;
            }
        }
        if !self.holding {
            return None;
        }
        if !self.rotating {
            self.position += self.velocity;
        }
        self.prev_pointer = self.pointer;
        Some(self.transform())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn drag_moves_by_pointer_delta() {
        let stack = StackOrder::default();
        let mut g = PaperGesture::new(7.0);
        g.mouse_move(v(100.0, 100.0));
        assert_eq!(g.mouse_down(MouseButton::Primary, v(100.0, 100.0), &stack), Some(1));
        assert!(g.mouse_move(v(110.0, 95.0)).is_some());
        let t = g.mouse_move(v(130.0, 80.0)).unwrap();
        g.release();
        assert_eq!(t.position, v(30.0, -20.0));
        assert_eq!(g.position, v(30.0, -20.0));
        assert_eq!(g.rotation, 7.0);
    }

    #[test]
    fn press_without_earlier_move_uses_press_position() {
        let stack = StackOrder::default();
        let mut g = PaperGesture::new(0.0);
        g.mouse_down(MouseButton::Primary, v(100.0, 100.0), &stack);
        assert_eq!(g.anchor, v(100.0, 100.0));
        g.mouse_move(v(110.0, 100.0));
        g.release();
        assert_eq!(g.position, v(10.0, 0.0));
    }

    #[test]
    fn stale_pointer_does_not_leak_into_next_drag() {
        let stack = StackOrder::default();
        let mut g = PaperGesture::new(0.0);
        g.mouse_move(v(5.0, 5.0));
        // Cursor jumped without a move event reaching the document.
        g.mouse_down(MouseButton::Primary, v(300.0, 200.0), &stack);
        g.mouse_move(v(320.0, 190.0));
        g.release();
        assert_eq!(g.position, v(20.0, -10.0));
    }

    #[test]
    fn right_press_from_idle_anchors_at_press() {
        let stack = StackOrder::default();
        let mut g = PaperGesture::new(0.0);
        g.mouse_down(MouseButton::Secondary, v(50.0, 50.0), &stack);
        let t = g.mouse_move(v(50.0, 80.0)).unwrap();
        assert_eq!(t.rotation, 90.0);
        assert_eq!(t.position, Vec2::ZERO);
    }

    #[test]
    fn moves_while_idle_do_not_move_the_paper() {
        let stack = StackOrder::default();
        let mut g = PaperGesture::new(0.0);
        assert_eq!(g.mouse_move(v(5.0, 5.0)), None);
        assert_eq!(g.mouse_move(v(50.0, 80.0)), None);
        assert_eq!(g.position, Vec2::ZERO);
        g.mouse_down(MouseButton::Primary, v(50.0, 80.0), &stack);
        g.mouse_move(v(60.0, 80.0));
        g.release();
        assert_eq!(g.position, v(10.0, 0.0));
        g.mouse_move(v(500.0, 500.0));
        assert_eq!(g.position, v(10.0, 0.0));
    }

    #[test]
    fn repeated_drags_accumulate() {
        let stack = StackOrder::default();
        let mut g = PaperGesture::new(0.0);
        g.mouse_move(v(0.0, 0.0));
        g.mouse_down(MouseButton::Primary, v(0.0, 0.0), &stack);
        g.mouse_move(v(10.0, 10.0));
        g.release();
        g.mouse_move(v(40.0, 40.0));
        g.mouse_down(MouseButton::Primary, v(40.0, 40.0), &stack);
        g.mouse_move(v(45.0, 35.0));
        g.release();
        assert_eq!(g.position, v(15.0, 5.0));
        assert_eq!(g.z_index, Some(2));
    }

    #[test]
    fn reentrant_press_is_ignored() {
        let stack = StackOrder::default();
        let mut g = PaperGesture::new(0.0);
        assert_eq!(g.mouse_down(MouseButton::Primary, v(0.0, 0.0), &stack), Some(1));
        assert_eq!(g.mouse_down(MouseButton::Primary, v(0.0, 0.0), &stack), None);
        assert_eq!(stack.peek(), 2);
        assert!(!g.rotating);
    }

    #[test]
    fn latest_grab_is_on_top() {
        let stack = StackOrder::default();
        let mut a = PaperGesture::new(0.0);
        let mut b = PaperGesture::new(0.0);
        let za = a.mouse_down(MouseButton::Primary, v(0.0, 0.0), &stack).unwrap();
        let zb = b.touch_start(&[v(1.0, 1.0)], &stack).unwrap();
        a.release();
        let za2 = a.mouse_down(MouseButton::Primary, v(0.0, 0.0), &stack).unwrap();
        assert_eq!((za, zb, za2), (1, 2, 3));
        assert!(za2 > zb);
    }

    #[test]
    fn right_press_rotates_around_anchor() {
        let stack = StackOrder::default();
        let mut g = PaperGesture::new(12.0);
        g.mouse_move(v(100.0, 100.0));
        g.mouse_down(MouseButton::Primary, v(100.0, 100.0), &stack);
        g.mouse_down(MouseButton::Secondary, v(100.0, 100.0), &stack);
        assert!(g.rotating);
        assert_eq!(stack.peek(), 2);
        let t = g.mouse_move(v(100.0, 150.0)).unwrap();
        assert_eq!(t.rotation, 90.0);
        assert_eq!(t.position, Vec2::ZERO);
        let t = g.mouse_move(v(50.0, 100.0)).unwrap();
        assert_eq!(t.rotation, 180.0);
        assert_eq!(t.position, Vec2::ZERO);
    }

    #[test]
    fn right_press_from_idle_holds_and_rotates() {
        let stack = StackOrder::default();
        let mut g = PaperGesture::new(0.0);
        assert_eq!(g.mouse_down(MouseButton::Secondary, v(0.0, 0.0), &stack), Some(1));
        assert!(g.holding && g.rotating);
        let t = g.mouse_move(v(0.0, -10.0)).unwrap();
        assert_eq!(t.rotation, 270.0);
    }

    #[test]
    fn pointer_on_anchor_keeps_rotation() {
        let stack = StackOrder::default();
        let mut g = PaperGesture::new(0.0);
        g.mouse_move(v(20.0, 20.0));
        g.mouse_down(MouseButton::Primary, v(20.0, 20.0), &stack);
        g.mouse_down(MouseButton::Secondary, v(20.0, 20.0), &stack);
        g.mouse_move(v(40.0, 20.0));
        assert_eq!(g.rotation, 0.0);
        g.mouse_move(v(20.0, 40.0));
        assert_eq!(g.rotation, 90.0);
        let t = g.mouse_move(v(20.0, 20.0)).unwrap();
        assert_eq!(t.rotation, 90.0);
        assert!(t.rotation.is_finite());
    }

    #[test]
    fn rotation_always_normalized() {
        let stack = StackOrder::default();
        let mut g = PaperGesture::new(-9.0);
        g.mouse_down(MouseButton::Secondary, v(0.0, 0.0), &stack);
        for i in 0..72 {
            let a = (i as f64 * 5.3).to_radians();
            g.mouse_move(v(a.cos() * 40.0, a.sin() * 40.0));
            assert!((0.0..360.0).contains(&g.rotation), "{}", g.rotation);
        }
    }

    #[test]
    fn release_clears_flags_from_any_state() {
        let stack = StackOrder::default();
        let mut g = PaperGesture::new(0.0);
        g.release();
        assert!(!g.holding && !g.rotating);
        g.mouse_down(MouseButton::Primary, v(0.0, 0.0), &stack);
        g.release();
        assert!(!g.holding && !g.rotating);
        g.mouse_down(MouseButton::Secondary, v(0.0, 0.0), &stack);
        g.release();
        assert!(!g.holding && !g.rotating);
        g.touch_start(&[v(0.0, 0.0), v(5.0, 5.0)], &stack);
        g.touch_end();
        assert!(!g.holding && !g.rotating);
    }

    #[test]
    fn single_finger_drag() {
        let stack = StackOrder::default();
        let mut g = PaperGesture::new(3.0);
        assert_eq!(g.touch_start(&[v(200.0, 300.0)], &stack), Some(1));
        assert_eq!(g.anchor, v(200.0, 300.0));
        g.touch_move(&[v(210.0, 310.0)]);
        let t = g.touch_move(&[v(190.0, 330.0)]).unwrap();
        g.touch_end();
        assert_eq!(t.position, v(-10.0, 30.0));
        assert_eq!(t.rotation, 3.0);
    }

    #[test]
    fn second_finger_starts_rotation_without_new_claim() {
        let stack = StackOrder::default();
        let mut g = PaperGesture::new(0.0);
        g.touch_start(&[v(0.0, 0.0)], &stack);
        assert_eq!(g.touch_start(&[v(0.0, 0.0), v(10.0, 0.0)], &stack), None);
        assert!(g.rotating);
        assert_eq!(stack.peek(), 2);
    }

    #[test]
    fn two_finger_angle_comes_from_contacts() {
        let stack = StackOrder::default();
        let mut g = PaperGesture::new(0.0);
        g.touch_start(&[v(100.0, 100.0), v(200.0, 100.0)], &stack);
        let t = g.touch_move(&[v(100.0, 100.0), v(100.0, 200.0)]).unwrap();
        assert_eq!(t.rotation, 90.0);
        // Held, so the midpoint does not recenter the paper.
        assert_eq!(t.position, Vec2::ZERO);
        let t = g.touch_move(&[v(150.0, 120.0), v(50.0, 120.0)]).unwrap();
        assert_eq!(t.rotation, 180.0);
    }

    #[test]
    fn two_finger_recenters_when_not_held() {
        let mut g = PaperGesture::new(0.0);
        g.anchor = v(10.0, 10.0);
        g.rotating = true;
        let t = g.touch_move(&[v(20.0, 20.0), v(40.0, 20.0)]).unwrap();
        assert_eq!(t.position, v(20.0, 10.0));
        assert_eq!(t.rotation, 0.0);
    }

    #[test]
    fn empty_touch_lists_are_ignored() {
        let stack = StackOrder::default();
        let mut g = PaperGesture::new(0.0);
        assert_eq!(g.touch_start(&[], &stack), None);
        assert!(!g.holding);
        assert_eq!(g.touch_move(&[]), None);
    }

    #[test]
    fn css_transform() {
        let t = PaperTransform {
            position: v(12.5, -3.0),
            rotation: 45.0,
        };
        assert_eq!(t.css(), "translateX(12.5px) translateY(-3px) rotateZ(45deg)");
    }

    #[test]
    fn button_codes() {
        assert_eq!(MouseButton::from_code(0), MouseButton::Primary);
        assert_eq!(MouseButton::from_code(2), MouseButton::Secondary);
        assert_eq!(MouseButton::from_code(1), MouseButton::Other(1));
    }
}
