use std::collections::BTreeMap;

/// Free-text term plus structured qualifiers for one code search.
///
/// The term is percent-encoded before being joined into the `q` parameter.
/// The HTTP layer encodes the whole query string a second time when the
/// request is built; that double encoding matches the original behavior of
/// the tool and is kept as-is.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    term: String,
    qualifiers: BTreeMap<&'static str, String>,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>) -> Self {
        SearchQuery {
            term: term.into(),
            qualifiers: BTreeMap::new(),
        }
    }

    /// Restrict matches to files with this name.
    pub fn filename(mut self, name: impl Into<String>) -> Self {
        self.qualifiers.insert("filename", name.into());
        self
    }

    /// Restrict matches to a single `owner/name` repository.
    pub fn repo(mut self, full_name: impl Into<String>) -> Self {
        self.qualifiers.insert("repo", full_name.into());
        self
    }

    /// The free-text term with reserved URL characters percent-encoded.
    /// Alphanumerics pass through untouched, so encoding a plain word or an
    /// empty string is a no-op.
    pub fn encoded_term(&self) -> String {
        urlencoding::encode(&self.term).into_owned()
    }

    /// Render the `q` parameter: encoded term first, then `key:value`
    /// qualifiers in key order.
    pub fn to_query_string(&self) -> String {
        let mut q = self.encoded_term();
        for (key, value) in &self.qualifiers {
            if !q.is_empty() {
                q.push(' ');
            }
            q.push_str(key);
            q.push(':');
            q.push_str(value);
        }
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn plain_term_is_untouched() {
        let q = SearchQuery::new("angular");
        assert_eq!(q.encoded_term(), "angular");
    }

    #[test]
    fn empty_term_is_a_noop() {
        let q = SearchQuery::new("");
        assert_eq!(q.encoded_term(), "");
        assert_eq!(
            q.clone().filename("package.json").to_query_string(),
            "filename:package.json"
        );
    }

    #[test]
    fn reserved_characters_are_percent_encoded() {
        let q = SearchQuery::new("a b/c&d");
        assert_eq!(q.encoded_term(), "a%20b%2Fc%26d");
    }

    #[test]
    fn query_string_orders_qualifiers_by_key() {
        let q = SearchQuery::new("angular")
            .repo("gothinkster/angularjs-realworld-example-app")
            .filename("package.json");
        assert_eq!(
            q.to_query_string(),
            "angular filename:package.json repo:gothinkster/angularjs-realworld-example-app"
        );
    }

    proptest! {
        #[test]
        fn encode_round_trips(term in ".{0,64}") {
            let q = SearchQuery::new(term.clone());
            let encoded = q.encoded_term();
            let decoded = urlencoding::decode(&encoded).unwrap();
            prop_assert_eq!(decoded.into_owned(), term);
        }
    }
}
