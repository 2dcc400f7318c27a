/*
 * Responsibility
 * - 認証 gate の本体 (設定解決 / 抽出 / 検証 / 判定 / ログ)
 * - HTTP への適用は middleware::auth、handler への受け渡しは api::v1::extractors
 */
pub mod decision;
pub mod extractor;
pub mod factory;
pub mod gate;
pub mod logger;
pub mod options;
pub mod verifier;

pub use decision::Decision;
pub use extractor::{BearerHeader, Extraction, HeaderToken, QueryToken, TokenExtractor};
pub use factory::build_auth_gate;
pub use gate::AuthGate;
pub use logger::{GateLogger, TracingLogger};
pub use options::{GateConfig, GateOptions, MessageOverrides, Messages};
pub use verifier::{Claims, TokenVerifier, VerificationOutcome};
