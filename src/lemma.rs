//! Part-of-speech tagging and lemmatization
//!
//! A small rule-based tagger assigns each token a coarse POS category;
//! tokens tagged adjective, verb, noun, or adverb are lemmatized with
//! POS-specific suffix rules plus an irregular-form table. Tokens in any
//! other category (determiners, prepositions, conjunctions, pronouns,
//! numbers) pass through unchanged — they are never lemmatized as nouns.
//! That asymmetry is load-bearing: it decides which surface forms collapse
//! to the same phrase.
//!
//! The suffix rules are a deterministic approximation of dictionary-backed
//! lemmatization: regular inflections reduce to a common stem, and the same
//! surface form always maps to the same lemma.

use rustc_hash::FxHashMap;

/// Coarse part-of-speech category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosTag {
    Adjective,
    Verb,
    Noun,
    Adverb,
    Determiner,
    Preposition,
    Conjunction,
    Pronoun,
    Number,
    Other,
}

impl PosTag {
    /// Whether this category participates in lemmatization
    pub fn lemmatizable(self) -> bool {
        matches!(
            self,
            PosTag::Adjective | PosTag::Verb | PosTag::Noun | PosTag::Adverb
        )
    }
}

const DETERMINERS: &[&str] = &[
    "a", "an", "another", "any", "each", "either", "every", "neither", "no",
    "some", "that", "the", "these", "this", "those",
];

const PREPOSITIONS: &[&str] = &[
    "about", "above", "across", "after", "against", "among", "around", "at",
    "before", "behind", "below", "between", "by", "during", "for", "from",
    "in", "into", "like", "of", "off", "on", "onto", "out", "over",
    "through", "to", "toward", "under", "until", "upon", "with", "within",
    "without",
];

const CONJUNCTIONS: &[&str] = &[
    "although", "and", "because", "but", "if", "nor", "or", "since", "so",
    "though", "unless", "whereas", "while", "yet",
];

const PRONOUNS: &[&str] = &[
    "he", "her", "hers", "herself", "him", "himself", "his", "i", "it",
    "its", "itself", "me", "mine", "my", "myself", "our", "ours",
    "ourselves", "she", "their", "theirs", "them", "themselves", "they",
    "us", "we", "what", "which", "who", "whom", "whose", "you", "your",
    "yours", "yourself", "yourselves",
];

/// Modal auxiliaries are tagged as their own (non-lemmatizable) category
const MODALS: &[&str] = &[
    "can", "could", "may", "might", "must", "shall", "should", "will",
    "would",
];

/// Irregular and auxiliary verb forms that suffix shape cannot identify
const VERB_FORMS: &[&str] = &[
    "am", "are", "be", "became", "been", "began", "begun", "being",
    "brought", "came", "chose", "chosen", "did", "do", "does", "done",
    "drawn", "drew", "felt", "found", "gave", "given", "gone", "got", "had",
    "has", "have", "held", "is", "kept", "knew", "known", "made", "meant",
    "ran", "said", "saw", "seen", "showed", "shown", "taken", "took",
    "thought", "was", "went", "were", "written", "wrote",
];

/// Tag a single lowercased token with a coarse POS category
///
/// Closed-class words are looked up directly; open-class words are guessed
/// from suffix shape, defaulting to noun.
pub fn tag(token: &str) -> PosTag {
    if DETERMINERS.contains(&token) {
        return PosTag::Determiner;
    }
    if PREPOSITIONS.contains(&token) {
        return PosTag::Preposition;
    }
    if CONJUNCTIONS.contains(&token) {
        return PosTag::Conjunction;
    }
    if PRONOUNS.contains(&token) {
        return PosTag::Pronoun;
    }
    if MODALS.contains(&token) {
        return PosTag::Other;
    }
    if VERB_FORMS.contains(&token) {
        return PosTag::Verb;
    }
    if token.bytes().all(|b| b.is_ascii_digit()) {
        return PosTag::Number;
    }
    if token.bytes().any(|b| b.is_ascii_digit()) {
        // Mixed alphanumeric codes ("t2", "icd10") are left alone
        return PosTag::Other;
    }

    let n = token.len();
    if n > 4 && token.ends_with("ly") {
        return PosTag::Adverb;
    }
    if n > 5 && token.ends_with("ing") {
        return PosTag::Verb;
    }
    if n > 4 && token.ends_with("ed") {
        return PosTag::Verb;
    }
    for suffix in ["ous", "ful", "ive", "ble", "ical", "ish", "less"] {
        if n > suffix.len() + 1 && token.ends_with(suffix) {
            return PosTag::Adjective;
        }
    }
    PosTag::Noun
}

/// POS-aware lemmatizer with irregular-form tables
///
/// Construct once before mining and share by reference; the tables are
/// immutable after construction.
pub struct Lemmatizer {
    nouns: FxHashMap<&'static str, &'static str>,
    verbs: FxHashMap<&'static str, &'static str>,
    adjectives: FxHashMap<&'static str, &'static str>,
    adverbs: FxHashMap<&'static str, &'static str>,
}

impl Lemmatizer {
    pub fn new() -> Self {
        Self {
            nouns: NOUN_EXCEPTIONS.iter().copied().collect(),
            verbs: VERB_EXCEPTIONS.iter().copied().collect(),
            adjectives: ADJ_EXCEPTIONS.iter().copied().collect(),
            adverbs: ADV_EXCEPTIONS.iter().copied().collect(),
        }
    }

    /// Tag the token and lemmatize it if its category allows
    pub fn lemmatize(&self, token: &str) -> String {
        self.lemmatize_pos(token, tag(token))
    }

    /// Lemmatize under an explicit POS category
    pub fn lemmatize_pos(&self, token: &str, pos: PosTag) -> String {
        match pos {
            PosTag::Noun => self.noun(token),
            PosTag::Verb => self.verb(token),
            PosTag::Adjective => self.adjective(token),
            PosTag::Adverb => self.adverb(token),
            _ => token.to_string(),
        }
    }

    fn noun(&self, token: &str) -> String {
        if let Some(lemma) = self.nouns.get(token) {
            return lemma.to_string();
        }
        let n = token.len();
        for (suffix, replacement, min_len) in NOUN_RULES {
            if n >= *min_len && token.ends_with(suffix) {
                return format!("{}{}", &token[..n - suffix.len()], replacement);
            }
        }
        // "-uses" after a consonant is an "-us" plural ("viruses"); after a
        // vowel it is a plain "-s" plural ("causes"), left to the guard below
        if n >= 5 && token.ends_with("uses") && !is_vowel(token.as_bytes()[n - 5]) {
            return token[..n - 2].to_string();
        }
        if n >= 3
            && token.ends_with('s')
            && !token.ends_with("ss")
            && !token.ends_with("us")
            && !token.ends_with("is")
        {
            return token[..n - 1].to_string();
        }
        token.to_string()
    }

    fn verb(&self, token: &str) -> String {
        if let Some(lemma) = self.verbs.get(token) {
            return lemma.to_string();
        }
        let n = token.len();
        for (suffix, replacement, min_len) in VERB_RULES {
            if n >= *min_len && token.ends_with(suffix) {
                return format!("{}{}", &token[..n - suffix.len()], replacement);
            }
        }
        if let Some(stem) = strip_participle(token, "ed") {
            return stem;
        }
        if let Some(stem) = strip_participle(token, "ing") {
            return stem;
        }
        if n >= 3
            && token.ends_with('s')
            && !token.ends_with("ss")
            && !token.ends_with("us")
            && !token.ends_with("is")
        {
            return token[..n - 1].to_string();
        }
        token.to_string()
    }

    fn adjective(&self, token: &str) -> String {
        if let Some(lemma) = self.adjectives.get(token) {
            return lemma.to_string();
        }
        let n = token.len();
        if n >= 6 && token.ends_with("iest") {
            return format!("{}y", &token[..n - 4]);
        }
        if n >= 5 && token.ends_with("ier") {
            return format!("{}y", &token[..n - 3]);
        }
        if n >= 5 && token.ends_with("est") {
            return undouble(&token[..n - 3]);
        }
        if n >= 4 && token.ends_with("er") {
            return undouble(&token[..n - 2]);
        }
        token.to_string()
    }

    fn adverb(&self, token: &str) -> String {
        // No productive suffix rules for adverbs, only irregulars
        match self.adverbs.get(token) {
            Some(lemma) => lemma.to_string(),
            None => token.to_string(),
        }
    }
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Suffix rules as (suffix, replacement, minimum token length)
const NOUN_RULES: &[(&str, &str, usize)] = &[
    ("sses", "ss", 5),
    ("ches", "ch", 5),
    ("shes", "sh", 5),
    ("xes", "x", 4),
    ("zes", "z", 4),
    ("ies", "y", 5),
    ("oes", "o", 6),
];

fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u')
}

const VERB_RULES: &[(&str, &str, usize)] = &[
    ("ies", "y", 5),
    ("ied", "y", 5),
    ("sses", "ss", 5),
    ("ches", "ch", 5),
    ("shes", "sh", 5),
    ("xes", "x", 4),
    ("zes", "z", 4),
    ("oes", "o", 4),
    ("es", "e", 4),
];

/// Strip a participle suffix and undouble the final consonant
/// ("stopped" → "stop", "planning" → "plan"); returns None if the suffix
/// does not apply or the stem would be too short.
fn strip_participle(token: &str, suffix: &str) -> Option<String> {
    let stem = token.strip_suffix(suffix)?;
    if stem.len() < 3 {
        return None;
    }
    Some(undouble(stem))
}

/// Collapse a trailing doubled consonant ("referr" → "refer"); `ll`, `ss`,
/// and `zz` stay doubled ("fill", "pass", "buzz")
fn undouble(stem: &str) -> String {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n >= 2 && bytes[n - 1] == bytes[n - 2] {
        let c = bytes[n - 1];
        if c.is_ascii_alphabetic() && !b"aeioulsz".contains(&c) {
            return stem[..n - 1].to_string();
        }
    }
    stem.to_string()
}

const NOUN_EXCEPTIONS: &[(&str, &str)] = &[
    ("analyses", "analysis"),
    ("appendices", "appendix"),
    ("children", "child"),
    ("criteria", "criterion"),
    ("data", "datum"),
    ("diagnoses", "diagnosis"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("indices", "index"),
    ("lives", "life"),
    ("men", "man"),
    ("mice", "mouse"),
    ("people", "person"),
    ("phenomena", "phenomenon"),
    ("prognoses", "prognosis"),
    ("sera", "serum"),
    ("series", "series"),
    ("species", "species"),
    ("stimuli", "stimulus"),
    ("teeth", "tooth"),
    ("women", "woman"),
];

const VERB_EXCEPTIONS: &[(&str, &str)] = &[
    ("am", "be"),
    ("are", "be"),
    ("became", "become"),
    ("been", "be"),
    ("began", "begin"),
    ("begun", "begin"),
    ("being", "be"),
    ("brought", "bring"),
    ("came", "come"),
    ("chose", "choose"),
    ("chosen", "choose"),
    ("did", "do"),
    ("done", "do"),
    ("drawn", "draw"),
    ("drew", "draw"),
    ("felt", "feel"),
    ("found", "find"),
    ("gave", "give"),
    ("given", "give"),
    ("gone", "go"),
    ("got", "get"),
    ("had", "have"),
    ("has", "have"),
    ("held", "hold"),
    ("is", "be"),
    ("kept", "keep"),
    ("knew", "know"),
    ("known", "know"),
    ("left", "leave"),
    ("made", "make"),
    ("meant", "mean"),
    ("ran", "run"),
    ("said", "say"),
    ("saw", "see"),
    ("seen", "see"),
    ("showed", "show"),
    ("shown", "show"),
    ("taken", "take"),
    ("took", "take"),
    ("thought", "think"),
    ("was", "be"),
    ("went", "go"),
    ("were", "be"),
    ("written", "write"),
    ("wrote", "write"),
];

const ADJ_EXCEPTIONS: &[(&str, &str)] = &[
    ("best", "good"),
    ("better", "good"),
    ("further", "far"),
    ("worse", "bad"),
    ("worst", "bad"),
];

const ADV_EXCEPTIONS: &[(&str, &str)] = &[
    ("best", "well"),
    ("better", "well"),
    ("farther", "far"),
    ("further", "far"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_closed_classes() {
        assert_eq!(tag("the"), PosTag::Determiner);
        assert_eq!(tag("of"), PosTag::Preposition);
        assert_eq!(tag("and"), PosTag::Conjunction);
        assert_eq!(tag("it"), PosTag::Pronoun);
        assert_eq!(tag("were"), PosTag::Verb);
        assert_eq!(tag("should"), PosTag::Other);
        assert_eq!(tag("42"), PosTag::Number);
        assert_eq!(tag("icd10"), PosTag::Other);
    }

    #[test]
    fn test_tag_open_classes() {
        assert_eq!(tag("quickly"), PosTag::Adverb);
        assert_eq!(tag("treating"), PosTag::Verb);
        assert_eq!(tag("treated"), PosTag::Verb);
        assert_eq!(tag("chronic"), PosTag::Noun); // default
        assert_eq!(tag("painful"), PosTag::Adjective);
        assert_eq!(tag("heart"), PosTag::Noun);
    }

    #[test]
    fn test_unlemmatizable_tokens_pass_through() {
        let lemmatizer = Lemmatizer::new();
        // Closed-class and numeric tokens are never noun-lemmatized
        assert_eq!(lemmatizer.lemmatize("the"), "the");
        assert_eq!(lemmatizer.lemmatize("this"), "this");
        assert_eq!(lemmatizer.lemmatize("42"), "42");
        assert_eq!(lemmatizer.lemmatize("icd10"), "icd10");
    }

    #[test]
    fn test_noun_lemmas() {
        let l = Lemmatizer::new();
        assert_eq!(l.lemmatize_pos("patients", PosTag::Noun), "patient");
        assert_eq!(l.lemmatize_pos("studies", PosTag::Noun), "study");
        assert_eq!(l.lemmatize_pos("classes", PosTag::Noun), "class");
        assert_eq!(l.lemmatize_pos("boxes", PosTag::Noun), "box");
        assert_eq!(l.lemmatize_pos("viruses", PosTag::Noun), "virus");
        assert_eq!(l.lemmatize_pos("diagnoses", PosTag::Noun), "diagnosis");
        assert_eq!(l.lemmatize_pos("feet", PosTag::Noun), "foot");
        // Guards: no stripping of -ss/-us/-is endings
        assert_eq!(l.lemmatize_pos("status", PosTag::Noun), "status");
        assert_eq!(l.lemmatize_pos("illness", PosTag::Noun), "illness");
        assert_eq!(l.lemmatize_pos("analysis", PosTag::Noun), "analysis");
    }

    #[test]
    fn test_verb_lemmas() {
        let l = Lemmatizer::new();
        assert_eq!(l.lemmatize_pos("treated", PosTag::Verb), "treat");
        assert_eq!(l.lemmatize_pos("treats", PosTag::Verb), "treat");
        assert_eq!(l.lemmatize_pos("treating", PosTag::Verb), "treat");
        assert_eq!(l.lemmatize_pos("stopped", PosTag::Verb), "stop");
        assert_eq!(l.lemmatize_pos("planning", PosTag::Verb), "plan");
        assert_eq!(l.lemmatize_pos("studied", PosTag::Verb), "study");
        assert_eq!(l.lemmatize_pos("was", PosTag::Verb), "be");
        assert_eq!(l.lemmatize_pos("filled", PosTag::Verb), "fill");
    }

    #[test]
    fn test_adjective_and_adverb_lemmas() {
        let l = Lemmatizer::new();
        assert_eq!(l.lemmatize_pos("bigger", PosTag::Adjective), "big");
        assert_eq!(l.lemmatize_pos("earliest", PosTag::Adjective), "early");
        assert_eq!(l.lemmatize_pos("better", PosTag::Adjective), "good");
        assert_eq!(l.lemmatize_pos("quickly", PosTag::Adverb), "quickly");
        assert_eq!(l.lemmatize_pos("further", PosTag::Adverb), "far");
    }

    #[test]
    fn test_same_form_same_lemma() {
        let l = Lemmatizer::new();
        assert_eq!(l.lemmatize("pressures"), l.lemmatize("pressures"));
    }
}
