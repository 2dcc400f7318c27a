/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - auth (gate), http (request id / trace / limit / timeout)
 */
pub mod auth;
pub mod http;
