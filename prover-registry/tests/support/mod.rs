//! テスト共通ユーティリティ
//!
//! 統合テスト・契約テストの双方から読み込まれるため、片方で未使用の
//! ヘルパーがあっても警告しない。
#![allow(dead_code)]

pub mod http;
pub mod prover;
pub mod registry;
