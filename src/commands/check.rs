//! Feedback check command

use crate::core::{Feedback, Mark, Sequence};
use crate::solver::Engine;

/// Feedback of one candidate against a reference
pub struct CheckResult {
    pub reference: Sequence,
    pub candidate: Sequence,
    pub feedback: Feedback,
    pub marks: Vec<Mark>,
}

/// Evaluate `candidate` against `reference`
///
/// # Errors
///
/// Returns an error if either argument is not a digit string or the lengths
/// differ.
pub fn check_feedback(
    reference: &str,
    candidate: &str,
    engine: &Engine,
) -> Result<CheckResult, String> {
    let reference = Sequence::parse(reference).map_err(|e| format!("Invalid reference: {e}"))?;
    let candidate = Sequence::parse(candidate).map_err(|e| format!("Invalid candidate: {e}"))?;

    let feedback = engine
        .evaluate_feedback(&reference, &candidate)
        .map_err(|e| e.to_string())?;

    Ok(CheckResult {
        reference,
        candidate,
        feedback,
        marks: Mark::for_guess(&reference, &candidate),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_dead_and_injured_digits() {
        let engine = Engine::default();
        let result = check_feedback("0123", "0132", &engine).unwrap();

        assert_eq!(result.feedback.dead().to_string(), "01");
        assert_eq!(result.feedback.injured().to_string(), "23");
        assert_eq!(
            result.marks,
            vec![Mark::Dead, Mark::Dead, Mark::Injured, Mark::Injured]
        );
    }

    #[test]
    fn repeated_digits_are_allowed_in_either_argument() {
        let engine = Engine::default();
        let result = check_feedback("1123", "1111", &engine).unwrap();
        assert_eq!(result.feedback.dead().to_string(), "1");
    }

    #[test]
    fn rejects_bad_input() {
        let engine = Engine::default();
        assert!(check_feedback("12a4", "1234", &engine).is_err());
        assert!(check_feedback("1234", "123", &engine).is_err());
    }
}
