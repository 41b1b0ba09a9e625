pub const OUTSTANDING: &str = "Outstanding! 🌟";
pub const GREAT_JOB: &str = "Great job! Keep it up!";
pub const GOOD_WORK: &str = "Good work! Aim higher!";
pub const DO_BETTER: &str = "You can do even better!";
pub const DONT_GIVE_UP: &str = "Don't give up! Every step counts!";

/// Encouragement line shown under the SGPA ring. First matching tier wins;
/// NaN matches no tier and gets the fallback.
pub fn classify(score: f64) -> &'static str {
    if score >= 9.0 {
        OUTSTANDING
    } else if score >= 8.0 {
        GREAT_JOB
    } else if score >= 7.0 {
        GOOD_WORK
    } else if score >= 6.0 {
        DO_BETTER
    } else {
        DONT_GIVE_UP
    }
}
