use super::suffix_trie::SuffixTrie;
use nsprobe_application::ports::RootZoneResolver;
use nsprobe_domain::zone_name::normalize;
use nsprobe_domain::DomainError;
use std::path::Path;
use tracing::{debug, info};

/// Rules used when no list file is configured.
const BUILTIN_RULES: &str = "
// generic
com
net
org
info
biz
io
dev
app
eu
// country codes with second-level registrations
uk
co.uk
org.uk
ac.uk
gov.uk
me.uk
ltd.uk
plc.uk
au
com.au
net.au
org.au
jp
co.jp
ne.jp
or.jp
nz
co.nz
net.nz
org.nz
br
com.br
net.br
za
co.za
de
fr
nl
be
ch
at
it
es
se
no
dk
fi
pl
ca
us
ck
*.ck
!www.ck
";

/// Registrable-root lookup driven by public suffix rules.
///
/// Accepts the list format published at publicsuffix.org: one rule per line,
/// `//` comments, `*.` wildcard and `!` exception rules.
pub struct PublicSuffixList {
    rules: SuffixTrie,
}

impl PublicSuffixList {
    pub fn builtin() -> Self {
        Self::parse(BUILTIN_RULES)
    }

    pub fn parse(content: &str) -> Self {
        let mut rules = SuffixTrie::new();
        for line in content.lines() {
            let rule = line.split_whitespace().next().unwrap_or("");
            if rule.is_empty() || rule.starts_with("//") {
                continue;
            }
            rules.insert(&rule.to_lowercase());
        }
        debug!(rules = rules.len(), "Public suffix rules loaded");
        Self { rules }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::IoError(format!(
                "Failed to read public suffix list {}: {}",
                path.display(),
                e
            ))
        })?;
        let list = Self::parse(&content);
        info!(path = %path.display(), rules = list.len(), "Public suffix list loaded");
        Ok(list)
    }

    /// The configured file, or the built-in rules when none is configured.
    pub fn load(path: Option<&str>) -> Result<Self, DomainError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.len() == 0
    }

    /// The public suffix of an already normalized name.
    pub fn public_suffix<'a>(&self, name: &'a str) -> &'a str {
        let count = self.rules.suffix_labels(name);
        tail_labels(name, count)
    }
}

impl RootZoneResolver for PublicSuffixList {
    fn registrable_root(&self, name: &str) -> Result<String, DomainError> {
        let name = normalize(name)?;
        let suffix_labels = self.rules.suffix_labels(&name);
        let labels = name.split('.').count();

        if labels <= suffix_labels {
            return Err(DomainError::InvalidDomainName(format!(
                "{} is a public suffix",
                name
            )));
        }

        Ok(tail_labels(&name, suffix_labels + 1).to_string())
    }
}

/// The last `count` labels of `name`.
fn tail_labels(name: &str, count: usize) -> &str {
    if count == 0 {
        return "";
    }
    match name.rmatch_indices('.').nth(count - 1) {
        Some((dot, _)) => &name[dot + 1..],
        None => name,
    }
}
