// Unit conversion: truncation for sleep/timestep, rounding for ticks and
// probabilities, and rejection of operands that do not fit a word.
#[cfg(test)]
mod tests {
    use traffic_commands::encoder::convert::{
        probability_to_fixed, seconds_to_ns, seconds_to_ticks, seconds_to_us,
    };
    use traffic_commands::types::CommandError;

    #[test]
    fn sleep_truncates_to_microseconds() {
        assert_eq!(seconds_to_us("sleep", 0.000001).unwrap(), 1);
        assert_eq!(seconds_to_us("sleep", 0.0000019).unwrap(), 1);
        assert_eq!(seconds_to_us("sleep", 0.0).unwrap(), 0);
    }

    #[test]
    fn timestep_truncates_to_nanoseconds() {
        assert_eq!(seconds_to_ns("timestep", 1e-9).unwrap(), 1);
        assert_eq!(seconds_to_ns("timestep", 1e-6).unwrap(), 1000);
    }

    #[test]
    fn ticks_round_to_nearest() {
        assert_eq!(seconds_to_ticks("run", 1e-6, 1e-9).unwrap(), 1000);
        assert_eq!(seconds_to_ticks("run", 1.5, 1.0).unwrap(), 2);
        assert_eq!(seconds_to_ticks("run", 2.5, 1.0).unwrap(), 3);
        assert_eq!(seconds_to_ticks("run", 1.49, 1.0).unwrap(), 1);
    }

    #[test]
    fn overflow_and_negative_operands_are_rejected() {
        assert!(matches!(
            seconds_to_ticks("run", 10.0, 1e-9),
            Err(CommandError::OperandOverflow { what: "run", .. })
        ));
        assert!(matches!(
            seconds_to_us("sleep", -1.0),
            Err(CommandError::OperandOverflow { .. })
        ));
        assert!(matches!(
            seconds_to_us("sleep", f64::NAN),
            Err(CommandError::OperandOverflow { .. })
        ));
    }

    #[test]
    fn probability_extremes() {
        assert_eq!(probability_to_fixed(0.0).unwrap(), 0);
        assert_eq!(probability_to_fixed(1.0).unwrap(), 0xFFFF_FFFF);
        assert_eq!(probability_to_fixed(0.5).unwrap(), 1 << 31);
        assert_eq!(probability_to_fixed(0.25).unwrap(), 1 << 30);
        // Rounds up to 2^32, clamped.
        assert_eq!(probability_to_fixed(1.0 - 1e-12).unwrap(), 0xFFFF_FFFF);
    }

    #[test]
    fn probability_outside_unit_interval_is_rejected() {
        assert!(probability_to_fixed(1.5).is_err());
        assert!(probability_to_fixed(-0.1).is_err());
        assert!(probability_to_fixed(f64::NAN).is_err());
    }
}
