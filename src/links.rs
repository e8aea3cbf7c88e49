//! Routes of the explorer pages. Keys are inserted as given.

pub fn address_path(address: &str) -> String {
    format!("/address/{address}")
}

pub fn block_path(number: u64) -> String {
    format!("/blocks/{number}")
}

pub fn transaction_path(hash: &str) -> String {
    format!("/transactions/{hash}")
}
