//! GraphQL documents sent to the explorer API.

use crate::types::TokenStandard;

pub const ACCOUNT_BY_ADDRESS: &str = r#"
query AccountByAddress($address: Address!, $cursor: Cursor, $count: Int!) {
  account(address: $address) {
    address
    contract {
      address
      deployedBy {
        hash
        contractAddress
      }
      name
      version
      compiler
      sourceCode
      abi
      validated
      supportContact
      timestamp
    }
    balance
    totalValue
    txCount
    txList(cursor: $cursor, count: $count) {
      pageInfo {
        first
        last
        hasNext
        hasPrevious
      }
      totalCount
      edges {
        cursor
        transaction {
          hash
          from
          to
          value
          gasUsed
          block {
            number
            timestamp
          }
          tokenTransactions {
            trxIndex
            tokenAddress
            tokenName
            tokenSymbol
            tokenType
            tokenId
            tokenDecimals
            type
            sender
            recipient
            amount
          }
        }
      }
    }
    staker {
      id
      createdTime
      isActive
    }
    delegations {
      totalCount
      edges {
        delegation {
          toStakerId
          createdTime
          amount
          claimedReward
          pendingRewards {
            amount
          }
        }
        cursor
      }
    }
  }
}
"#;

pub const BLOCK_BY_NUMBER: &str = r#"
query BlockByNumber($number: Long) {
  block(number: $number) {
    number
    transactionCount
    hash
    parent {
      hash
    }
    timestamp
    txList {
      hash
      from
      to
      value
      gasUsed
      block {
        number
        timestamp
      }
    }
  }
}
"#;

pub const TRANSACTION_BY_HASH: &str = r#"
query TransactionByHash($hash: Bytes32!) {
  transaction(hash: $hash) {
    hash
    from
    to
    value
    gasUsed
    block {
      number
      timestamp
    }
    tokenTransactions {
      trxIndex
      tokenAddress
      tokenName
      tokenSymbol
      tokenType
      tokenId
      tokenDecimals
      type
      sender
      recipient
      amount
    }
  }
}
"#;

pub const ERC20_TRANSFERS: &str = r#"
query Erc20TransfersByAddress($address: Address!, $cursor: Cursor, $count: Int!) {
  account(address: $address) {
    erc20TxList(cursor: $cursor, count: $count) {
      pageInfo { first last hasNext hasPrevious }
      totalCount
      edges {
        cursor
        trx {
          trxHash
          transaction { hash block { number timestamp } }
          trxIndex
          tokenAddress
          token { name symbol decimals }
          tokenType
          type
          sender
          recipient
          amount
        }
      }
    }
  }
}
"#;

pub const ERC721_TRANSFERS: &str = r#"
query Erc721TransfersByAddress($address: Address!, $cursor: Cursor, $count: Int!) {
  account(address: $address) {
    erc721TxList(cursor: $cursor, count: $count) {
      pageInfo { first last hasNext hasPrevious }
      totalCount
      edges {
        cursor
        trx {
          trxHash
          transaction { hash block { number timestamp } }
          trxIndex
          tokenAddress
          token { name symbol }
          tokenId
          tokenType
          type
          sender
          recipient
        }
      }
    }
  }
}
"#;

pub const ERC1155_TRANSFERS: &str = r#"
query Erc1155TransfersByAddress($address: Address!, $cursor: Cursor, $count: Int!) {
  account(address: $address) {
    erc1155TxList(cursor: $cursor, count: $count) {
      pageInfo { first last hasNext hasPrevious }
      totalCount
      edges {
        cursor
        trx {
          trxHash
          transaction { hash block { number timestamp } }
          trxIndex
          tokenAddress
          tokenId
          tokenType
          type
          sender
          recipient
          amount
        }
      }
    }
  }
}
"#;

/// Operation name and document for a token standard's transfer list.
pub fn token_transfers(standard: TokenStandard) -> (&'static str, &'static str) {
    match standard {
        TokenStandard::Erc20 => ("Erc20TransfersByAddress", ERC20_TRANSFERS),
        TokenStandard::Erc721 => ("Erc721TransfersByAddress", ERC721_TRANSFERS),
        TokenStandard::Erc1155 => ("Erc1155TransfersByAddress", ERC1155_TRANSFERS),
    }
}
