#[cfg(test)]
mod tests {
    use crate::modes::{ControlMode, GlobalMode, ModeController};

    #[test]
    fn test_new_controller_is_normal_and_disarmed() {
        let modes = ModeController::new(8000);
        assert_eq!(modes.global, GlobalMode::Normal);
        assert_eq!(modes.control, ControlMode::None);
        assert!(!modes.is_armed());
        assert_eq!(modes.generation(), 0);
    }

    #[test]
    fn test_chaotic_interval_is_twice_as_long() {
        let mut modes = ModeController::new(8000);
        assert_eq!(modes.current_duration_ms(), 8000);
        modes.global = GlobalMode::Chaotic;
        assert_eq!(modes.current_duration_ms(), 16000);
    }

    #[test]
    fn test_disarmed_timer_never_fires() {
        let mut modes = ModeController::new(8000);
        assert!(!modes.tick(1_000_000.0));
    }

    #[test]
    fn test_timer_fires_when_interval_elapses() {
        let mut modes = ModeController::new(8000);
        modes.arm();
        assert!(!modes.tick(4000.0));
        assert!(modes.tick(4000.0));
    }

    #[test]
    fn test_chaotic_timer_uses_the_longer_interval() {
        let mut modes = ModeController::new(8000);
        modes.global = GlobalMode::Chaotic;
        modes.arm();
        assert!(!modes.tick(15999.0));
        assert!(modes.tick(1.0));
    }

    #[test]
    fn test_rearming_discards_elapsed_progress() {
        let mut modes = ModeController::new(8000);
        modes.arm();
        assert!(!modes.tick(7000.0));
        modes.arm();
        assert!(!modes.tick(7000.0));
    }

    #[test]
    fn test_generation_bumps_on_every_schedule_change() {
        let mut modes = ModeController::new(8000);
        modes.arm();
        assert_eq!(modes.generation(), 1);
        modes.disarm();
        assert_eq!(modes.generation(), 2);
        modes.arm();
        assert_eq!(modes.generation(), 3);
    }

    #[test]
    fn test_flip_into_chaos_keeps_the_control_roll_pending() {
        let mut modes = ModeController::new(8000);
        modes.control = ControlMode::Inverted;
        modes.flip();
        // The roll belongs to the caller; flip leaves whatever was set.
        assert_eq!(modes.global, GlobalMode::Chaotic);
        assert_eq!(modes.control, ControlMode::Inverted);
    }

    #[test]
    fn test_flip_back_to_normal_clears_the_control() {
        let mut modes = ModeController::new(8000);
        modes.global = GlobalMode::Chaotic;
        modes.control = ControlMode::Double;
        modes.flip();
        assert_eq!(modes.global, GlobalMode::Normal);
        assert_eq!(modes.control, ControlMode::None);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut modes = ModeController::new(8000);
        modes.arm();
        modes.global = GlobalMode::Chaotic;
        modes.control = ControlMode::Reroll;

        modes.reset();

        assert_eq!(modes.global, GlobalMode::Normal);
        assert_eq!(modes.control, ControlMode::None);
        assert!(!modes.is_armed());
    }

    #[test]
    fn test_control_active_requires_chaos() {
        let mut modes = ModeController::new(8000);
        modes.control = ControlMode::Inverted;
        assert!(!modes.control_active(ControlMode::Inverted));

        modes.global = GlobalMode::Chaotic;
        assert!(modes.control_active(ControlMode::Inverted));
        assert!(!modes.control_active(ControlMode::Double));
    }

    #[test]
    fn test_roll_covers_only_real_quirks() {
        for seed in 0..100 {
            let mut rng = fastrand::Rng::with_seed(seed);
            let rolled = ControlMode::roll(&mut rng);
            assert!(matches!(
                rolled,
                ControlMode::Inverted | ControlMode::Reroll | ControlMode::Double
            ));
        }
    }
}
