//! 商品 ID
//!
//! 存储层使用 12 字节的二进制 ID，对外暴露为 24 位小写十六进制字符串。

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// 商品 ID 格式错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidProductId {
    #[error("expected {expected} hex characters, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("not a hex string: {0}")]
    Alphabet(#[from] hex::FromHexError),
}

/// 商品 ID（存储层原生的 12 字节标识）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId([u8; ProductId::LEN]);

impl ProductId {
    /// 二进制长度
    pub const LEN: usize = 12;
    /// 文本编码长度
    pub const ENCODED_LEN: usize = Self::LEN * 2;

    pub const fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    pub const fn bytes(&self) -> [u8; Self::LEN] {
        self.0
    }

    /// 解析外部传入的字符串 ID
    ///
    /// 大小写十六进制都接受
    pub fn decode(s: &str) -> Result<Self, InvalidProductId> {
        if s.len() != Self::ENCODED_LEN {
            return Err(InvalidProductId::Length {
                expected: Self::ENCODED_LEN,
                actual: s.len(),
            });
        }

        let mut bytes = [0u8; Self::LEN];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }

    /// 编码为对外的字符串 ID（小写）
    pub fn encode(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for ProductId {
    type Err = InvalidProductId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
