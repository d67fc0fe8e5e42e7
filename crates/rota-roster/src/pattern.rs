use crate::types::ShiftType;

/// Length of the repeating assignment cycle in days.
pub const CYCLE_LEN: usize = 21;

/// The fixed cycle: seven consecutive day shifts, then seven night/off pairs.
const CYCLE: [ShiftType; CYCLE_LEN] = [
    ShiftType::Day,
    ShiftType::Day,
    ShiftType::Day,
    ShiftType::Day,
    ShiftType::Day,
    ShiftType::Day,
    ShiftType::Day,
    ShiftType::Night,
    ShiftType::Off,
    ShiftType::Night,
    ShiftType::Off,
    ShiftType::Night,
    ShiftType::Off,
    ShiftType::Night,
    ShiftType::Off,
    ShiftType::Night,
    ShiftType::Off,
    ShiftType::Night,
    ShiftType::Off,
    ShiftType::Night,
    ShiftType::Off,
];

/// Shift label for cycle position `i`.
///
/// Total over all of `usize` — positions wrap at [`CYCLE_LEN`].
pub fn cycle_label(i: usize) -> ShiftType {
    CYCLE[i % CYCLE_LEN]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_seven_positions_are_day() {
        for i in 0..7 {
            assert_eq!(cycle_label(i), ShiftType::Day, "position {i}");
        }
    }

    #[test]
    fn tail_alternates_night_then_off() {
        for i in 7..CYCLE_LEN {
            let expected = if (i - 7) % 2 == 0 {
                ShiftType::Night
            } else {
                ShiftType::Off
            };
            assert_eq!(cycle_label(i), expected, "position {i}");
        }
    }

    #[test]
    fn cycle_is_periodic() {
        for i in 0..200 {
            assert_eq!(cycle_label(i), cycle_label(i + CYCLE_LEN), "position {i}");
        }
    }
}
