use std::{fmt, str::FromStr};

use bigdecimal::num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use super::{wire, BlockRef};

/// Token standards that get their own transfer list on the address page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenStandard {
    Erc20,
    Erc721,
    Erc1155,
}

impl TokenStandard {
    pub const ALL: [TokenStandard; 3] =
        [TokenStandard::Erc20, TokenStandard::Erc721, TokenStandard::Erc1155];

    /// Account field holding this standard's transfer connection.
    pub fn list_field(&self) -> &'static str {
        match self {
            TokenStandard::Erc20 => "erc20TxList",
            TokenStandard::Erc721 => "erc721TxList",
            TokenStandard::Erc1155 => "erc1155TxList",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TokenStandard::Erc20 => "ERC-20",
            TokenStandard::Erc721 => "ERC-721",
            TokenStandard::Erc1155 => "ERC-1155",
        }
    }

    /// ERC-721 transfers move exactly one token and carry no amount.
    pub fn is_fungible(&self) -> bool {
        !matches!(self, TokenStandard::Erc721)
    }
}

impl fmt::Display for TokenStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TokenStandard {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "erc20" => Ok(TokenStandard::Erc20),
            "erc721" => Ok(TokenStandard::Erc721),
            "erc1155" => Ok(TokenStandard::Erc1155),
            other => Err(format!("unknown token standard `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TokenInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "wire::deserialize_u64")]
    pub decimals: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TransactionRef {
    pub hash: String,
    #[serde(default)]
    pub block: Option<BlockRef>,
}

pub const MAX_TOKEN_DECIMALS: u64 = u8::MAX as u64;

/// One row of an ERC-20/721/1155 transfer list.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransfer {
    pub trx_hash: String,
    #[serde(default)]
    pub transaction: Option<TransactionRef>,
    #[serde(default, deserialize_with = "wire::deserialize_u64")]
    pub trx_index: u64,
    pub token_address: String,
    #[serde(default)]
    pub token: Option<TokenInfo>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub sender: String,
    pub recipient: String,
    #[serde(default, deserialize_with = "wire::deserialize_bigint")]
    pub token_id: BigInt,
    #[serde(default, deserialize_with = "wire::deserialize_bigint")]
    pub amount: BigInt,
}

impl TokenTransfer {
    pub fn block(&self) -> Option<&BlockRef> {
        self.transaction.as_ref().and_then(|tx| tx.block.as_ref())
    }

    /// Token decimals, capped at the `uint8` range of the ERC-20 field.
    pub fn decimals(&self) -> u32 {
        let decimals = self.token.as_ref().map(|token| token.decimals).unwrap_or(0);
        decimals.min(MAX_TOKEN_DECIMALS) as u32
    }
}
