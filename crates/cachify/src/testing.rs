//! In-process stand-in for a networked store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use cachify_core::{CachifyError, RemoteStore, Result};

/// Records what the Remote backend sends and answers like a key-value
/// server would. Expiry is recorded, not enforced.
#[derive(Default)]
pub(crate) struct FakeRemote {
    entries: Mutex<HashMap<String, (String, u64)>>,
    failure: Mutex<Option<String>>,
    calls: AtomicUsize,
}

impl FakeRemote {
    pub(crate) fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).map(|(v, _)| v.clone())
    }

    pub(crate) fn ttl_of(&self, key: &str) -> Option<u64> {
        self.entries.lock().unwrap().get(key).map(|(_, ttl)| *ttl)
    }

    pub(crate) fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), 60));
    }

    pub(crate) fn keys_sorted(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every following call fail with `message`
    pub(crate) fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    fn begin(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failure.lock().unwrap().as_ref() {
            Some(message) => Err(CachifyError::Backend(message.clone())),
            None => Ok(()),
        }
    }
}

/// Glob match with the key-value server's rules: `*`, `?`, `[...]` and
/// backslash escapes
fn glob_match(pattern: &[char], text: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some(('*', rest)) => (0..=text.len()).any(|i| glob_match(rest, &text[i..])),
        Some(('?', rest)) => !text.is_empty() && glob_match(rest, &text[1..]),
        Some(('[', rest)) => {
            let Some((&c, text_rest)) = text.split_first() else {
                return false;
            };
            let (negate, mut rest) = match rest.split_first() {
                Some(('^', tail)) => (true, tail),
                _ => (false, rest),
            };
            let mut matched = false;
            loop {
                match rest {
                    [] => return false,
                    [']', tail @ ..] => {
                        rest = tail;
                        break;
                    }
                    ['\\', escaped, tail @ ..] => {
                        matched |= *escaped == c;
                        rest = tail;
                    }
                    [lo, '-', hi, tail @ ..] if *hi != ']' => {
                        matched |= (*lo..=*hi).contains(&c);
                        rest = tail;
                    }
                    [other, tail @ ..] => {
                        matched |= *other == c;
                        rest = tail;
                    }
                }
            }
            matched != negate && glob_match(rest, text_rest)
        }
        Some(('\\', rest)) => match (rest.split_first(), text.split_first()) {
            (Some((p, rest)), Some((c, text_rest))) => p == c && glob_match(rest, text_rest),
            _ => false,
        },
        Some((p, rest)) => text.first() == Some(p) && glob_match(rest, &text[1..]),
    }
}

#[async_trait]
impl RemoteStore for FakeRemote {
    async fn set_ex(&self, key: &str, value: String, ttl_secs: u64) -> Result<()> {
        self.begin()?;
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value, ttl_secs));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.begin()?;
        Ok(self.raw(key))
    }

    async fn del(&self, keys: &[String]) -> Result<u64> {
        self.begin()?;
        let mut entries = self.entries.lock().unwrap();
        Ok(keys.iter().filter(|k| entries.remove(*k).is_some()).count() as u64)
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        self.begin()?;
        let pattern: Vec<char> = pattern.chars().collect();
        Ok(self
            .entries
            .lock()
            .unwrap()
            .keys()
            .filter(|k| glob_match(&pattern, &k.chars().collect::<Vec<_>>()))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(pattern: &str, text: &str) -> bool {
        let pattern: Vec<char> = pattern.chars().collect();
        glob_match(&pattern, &text.chars().collect::<Vec<_>>())
    }

    #[test]
    fn test_glob_metacharacters() {
        assert!(matches("a*", "a"));
        assert!(matches("a*", "abc"));
        assert!(matches("a?c", "abc"));
        assert!(matches("[ab]x", "bx"));
        assert!(matches("[^ab]x", "cx"));
        assert!(matches("[a-c]", "b"));
        assert!(!matches("a?c", "ac"));
        assert!(!matches("[ab]x", "cx"));
    }

    #[test]
    fn test_glob_escapes() {
        assert!(matches(r"a\*b", "a*b"));
        assert!(!matches(r"a\*b", "axb"));
        assert!(matches(r"\[x\]*", "[x]y"));
        assert!(!matches(r"\[x\]*", "xy"));
        assert!(matches(r"[\]]", "]"));
    }
}
