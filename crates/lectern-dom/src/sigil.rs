//! Paragraph sigils.
//!
//! A sigil is a leading character in a paragraph's rendered content that
//! selects a special transform instead of default rendering. Doubling the
//! character escapes it: the paragraph renders plainly with one literal
//! copy of the character.

/// Inline paragraph transforms, in dispatch priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sigil {
    /// `^` compact text.
    Small,
    /// `!` alert paragraph, relocated to the page top by the runtime.
    Alert,
    /// `:` lecture video source.
    Lecture,
    /// `;` animation frame sequence from a folder.
    Animation,
    /// `@` addressable anchor.
    Anchor,
    /// `%` inline video, optionally with a poster.
    Video,
    /// `&` embedded third-party snippet placeholder.
    Embed,
}

/// Outcome of inspecting a paragraph's leading text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SigilMatch {
    /// A sigil rule fires; the transform consumes the leading character.
    Fires(Sigil),
    /// A doubled sigil character: collapse to one literal copy, no rule.
    Escaped(char),
    /// Ordinary paragraph.
    Plain,
}

impl Sigil {
    pub const ALL: [Self; 7] = [
        Self::Small,
        Self::Alert,
        Self::Lecture,
        Self::Animation,
        Self::Anchor,
        Self::Video,
        Self::Embed,
    ];

    /// The character that selects this sigil.
    pub fn prefix(self) -> char {
        match self {
            Self::Small => '^',
            Self::Alert => '!',
            Self::Lecture => ':',
            Self::Animation => ';',
            Self::Anchor => '@',
            Self::Video => '%',
            Self::Embed => '&',
        }
    }

    /// Dispatch on the first character of a paragraph's leading text.
    ///
    /// Exactly one rule fires; the first match in priority order wins.
    pub fn detect(text: &str) -> SigilMatch {
        let mut chars = text.chars();
        let Some(first) = chars.next() else {
            return SigilMatch::Plain;
        };
        for sigil in Self::ALL {
            if first == sigil.prefix() {
                return if chars.next() == Some(first) {
                    SigilMatch::Escaped(first)
                } else {
                    SigilMatch::Fires(sigil)
                };
            }
        }
        SigilMatch::Plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_sigil_fires_on_its_prefix() {
        for sigil in Sigil::ALL {
            let text = format!("{}rest", sigil.prefix());
            assert_eq!(Sigil::detect(&text), SigilMatch::Fires(sigil));
        }
    }

    #[test]
    fn doubled_prefix_escapes_every_sigil() {
        for sigil in Sigil::ALL {
            let c = sigil.prefix();
            let text = format!("{c}{c}rest");
            assert_eq!(Sigil::detect(&text), SigilMatch::Escaped(c));
        }
    }

    #[test]
    fn plain_text_does_not_dispatch() {
        assert_eq!(Sigil::detect("ordinary"), SigilMatch::Plain);
        assert_eq!(Sigil::detect(""), SigilMatch::Plain);
    }

    #[test]
    fn bare_sigil_fires() {
        assert_eq!(Sigil::detect(";"), SigilMatch::Fires(Sigil::Animation));
    }
}
