/*
 * Responsibility
 * - リクエストから token を取り出す戦略 (TokenExtractor)
 * - 既定は BearerHeader。HeaderToken / QueryToken / closure にも差し替え可
 * - 検証はしない (head を読むだけ)
 */

use axum::http::{
    HeaderName,
    header::AUTHORIZATION,
    request::Parts,
};

/// extractor の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Token(String),
    /// 使える credential がない
    Missing,
    /// credential はあるが形式が不正。既定の BearerHeader は返さない
    Malformed,
}

impl From<Option<String>> for Extraction {
    fn from(token: Option<String>) -> Self {
        match token {
            Some(token) if !token.trim().is_empty() => Self::Token(token),
            _ => Self::Missing,
        }
    }
}

pub trait TokenExtractor: Send + Sync {
    fn extract(&self, parts: &Parts) -> Extraction;
}

impl<F, R> TokenExtractor for F
where
    F: Fn(&Parts) -> R + Send + Sync,
    R: Into<Extraction>,
{
    fn extract(&self, parts: &Parts) -> Extraction {
        self(parts).into()
    }
}

/// `Authorization: Bearer <token>`
///
/// scheme は `Bearer` と完全一致のみ。他の scheme / 非 UTF-8 / 空の token は
/// `Malformed` ではなく `Missing` として扱う。
#[derive(Debug, Clone, Copy, Default)]
pub struct BearerHeader;

impl TokenExtractor for BearerHeader {
    fn extract(&self, parts: &Parts) -> Extraction {
        let Some(value) = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
        else {
            return Extraction::Missing;
        };

        match value.split_once(char::is_whitespace) {
            Some(("Bearer", rest)) => Extraction::from(Some(rest.trim().to_string())),
            _ => Extraction::Missing,
        }
    }
}

/// 任意ヘッダの生の値 (ex: `X-Access-Token: <token>`)
#[derive(Debug, Clone)]
pub struct HeaderToken {
    name: HeaderName,
}

impl HeaderToken {
    pub fn new(name: HeaderName) -> Self {
        Self { name }
    }
}

impl TokenExtractor for HeaderToken {
    fn extract(&self, parts: &Parts) -> Extraction {
        parts
            .headers
            .get(&self.name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_string())
            .into()
    }
}

/// クエリパラメータ (ex: `?access_token=<token>`、percent-decode 済み)
#[derive(Debug, Clone)]
pub struct QueryToken {
    name: String,
}

impl QueryToken {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl TokenExtractor for QueryToken {
    fn extract(&self, parts: &Parts) -> Extraction {
        parts
            .uri
            .query()
            .and_then(|query| {
                url::form_urlencoded::parse(query.as_bytes())
                    .find(|(key, _)| key == self.name.as_str())
                    .map(|(_, value)| value.into_owned())
            })
            .into()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts_with_auth(value: &str) -> Parts {
        let (parts, _) = Request::builder()
            .uri("/")
            .header(AUTHORIZATION, value)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    fn parts_for(uri: &str) -> Parts {
        let (parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn bearer_header_returns_token() {
        let parts = parts_with_auth("Bearer abc.def.ghi");
        assert_eq!(
            BearerHeader.extract(&parts),
            Extraction::Token("abc.def.ghi".to_string())
        );
    }

    #[test]
    fn bearer_header_name_is_case_insensitive() {
        let (parts, _) = Request::builder()
            .uri("/")
            .header("authorization", "Bearer t0k3n")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(BearerHeader.extract(&parts), Extraction::Token("t0k3n".into()));
    }

    #[test]
    fn bearer_header_missing_or_unusable() {
        assert_eq!(BearerHeader.extract(&parts_for("/")), Extraction::Missing);

        let cases = ["Bearer", "Bearer ", "Bearer    ", "bearer abc", "Basic dXNlcjpwdw==", "Token abc", "Bearerabc"];
        for case in cases {
            assert_eq!(
                BearerHeader.extract(&parts_with_auth(case)),
                Extraction::Missing,
                "{case:?} should be treated as no token"
            );
        }
    }

    #[test]
    fn bearer_header_splits_on_first_whitespace_only() {
        let parts = parts_with_auth("Bearer\tabc");
        assert_eq!(BearerHeader.extract(&parts), Extraction::Token("abc".into()));

        let parts = parts_with_auth("Bearer abc def");
        assert_eq!(BearerHeader.extract(&parts), Extraction::Token("abc def".into()));
    }

    #[test]
    fn header_token_reads_custom_header() {
        let extractor = HeaderToken::new(HeaderName::from_static("x-access-token"));
        let (parts, _) = Request::builder()
            .uri("/")
            .header("X-Access-Token", "abc")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(extractor.extract(&parts), Extraction::Token("abc".into()));
        assert_eq!(extractor.extract(&parts_for("/")), Extraction::Missing);
    }

    #[test]
    fn query_token_is_percent_decoded() {
        let extractor = QueryToken::new("access_token");
        let parts = parts_for("/ws?room=1&access_token=a%2Eb.c");
        assert_eq!(extractor.extract(&parts), Extraction::Token("a.b.c".into()));
        assert_eq!(extractor.extract(&parts_for("/ws?room=1")), Extraction::Missing);
        assert_eq!(extractor.extract(&parts_for("/ws?access_token=")), Extraction::Missing);
    }

    #[test]
    fn closures_are_extractors() {
        let from_option = |parts: &Parts| -> Option<String> {
            parts.headers.get("x-key").map(|_| "k".to_string())
        };
        assert_eq!(from_option.extract(&parts_for("/")), Extraction::Missing);

        let always_malformed = |_: &Parts| Extraction::Malformed;
        assert_eq!(always_malformed.extract(&parts_for("/")), Extraction::Malformed);
    }
}
