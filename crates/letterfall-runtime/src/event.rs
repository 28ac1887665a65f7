//! User-triggered sandbox events

use letterfall_core::Vec2;

/// A discrete user action, delivered to the coordinator in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum SandboxEvent {
    /// Text submitted for spawning
    Submit(String),
    /// Pointer click in surface coordinates
    Click(Vec2),
    /// Remove every letter
    Reset,
    /// Flip hitbox outline visibility
    ToggleHitboxes,
    /// Flip between running and paused
    TogglePause,
    /// New sling radius from the radius control
    SetSlingRadius(f32),
    /// New sling power from the power control
    SetSlingPower(f32),
}

impl SandboxEvent {
    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            SandboxEvent::Submit(_) => "submit",
            SandboxEvent::Click(_) => "click",
            SandboxEvent::Reset => "reset",
            SandboxEvent::ToggleHitboxes => "toggle_hitboxes",
            SandboxEvent::TogglePause => "toggle_pause",
            SandboxEvent::SetSlingRadius(_) => "set_sling_radius",
            SandboxEvent::SetSlingPower(_) => "set_sling_power",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert_eq!(SandboxEvent::Click(Vec2::ZERO).kind(), "click");
        assert_eq!(SandboxEvent::Submit("hi".into()).kind(), "submit");
    }
}
