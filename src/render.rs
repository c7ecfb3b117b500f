//! JSON rendering for reports printed on stdout.
//!
//! `u64` amounts are written as decimal strings so no consumer truncates
//! them to a double; raw byte buffers are written as lowercase hex.

use serde::{Serialize, Serializer};
use solana_account_decoder::{UiAccount, UiAccountEncoding};
use solana_sdk::{account::Account, instruction::Instruction, message::Message, pubkey::Pubkey};
use solana_transaction_status::{Encodable, UiMessage, UiTransactionEncoding};

use crate::error::Result;

pub fn u64_as_string<S: Serializer>(value: &u64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

pub fn opt_u64_as_string<S: Serializer>(
    value: &Option<u64>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.collect_str(v),
        None => serializer.serialize_none(),
    }
}

pub fn bytes_as_hex<S: Serializer>(bytes: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}

pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Account snapshot in the RPC's UI shape, data as base64
pub fn account_view(pubkey: &Pubkey, account: &Account) -> UiAccount {
    UiAccount::encode(pubkey, account, UiAccountEncoding::Base64, None, None)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMetaView {
    pub pubkey: String,
    pub is_signer: bool,
    pub is_writable: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionView {
    pub program_id: String,
    pub keys: Vec<AccountMetaView>,
    #[serde(serialize_with = "bytes_as_hex")]
    pub data: Vec<u8>,
}

impl From<&Instruction> for InstructionView {
    fn from(instruction: &Instruction) -> Self {
        Self {
            program_id: instruction.program_id.to_string(),
            keys: instruction
                .accounts
                .iter()
                .map(|meta| AccountMetaView {
                    pubkey: meta.pubkey.to_string(),
                    is_signer: meta.is_signer,
                    is_writable: meta.is_writable,
                })
                .collect(),
            data: instruction.data.clone(),
        }
    }
}

/// Compiled message as the RPC would return it for `json` encoding
pub fn message_view(message: &Message) -> UiMessage {
    message.encode(UiTransactionEncoding::Json)
}
