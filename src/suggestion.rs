/// Find the candidate closest to `word`, to power "did you mean" hints.
///
/// Very short inputs produce too many false positives, so they never get a
/// suggestion, and candidates further than a few edits away are ignored.
pub fn did_you_mean<'a, S: AsRef<str>>(
    candidates: impl IntoIterator<Item = &'a S>,
    word: &str,
) -> Option<String>
where
    S: 'a,
{
    if word.len() < 3 {
        return None;
    }

    let word = word.to_lowercase();

    candidates
        .into_iter()
        .map(|candidate| {
            let candidate = candidate.as_ref();
            (
                strsim::damerau_levenshtein(&candidate.to_lowercase(), &word),
                candidate,
            )
        })
        .filter(|(distance, _)| *distance <= 3)
        .min_by_key(|(distance, candidate)| (*distance, candidate.to_owned()))
        .map(|(_, candidate)| candidate.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestions() {
        let candidates = ["meter", "second", "kilogram", "kelvin"];

        assert_eq!(did_you_mean(&candidates, "metre").as_deref(), Some("meter"));
        assert_eq!(did_you_mean(&candidates, "Second").as_deref(), Some("second"));
        assert_eq!(did_you_mean(&candidates, "xyzzy"), None);
        assert_eq!(did_you_mean(&candidates, "m"), None);
    }
}
