//! Receipt codec: canonical RLP encoding of transaction receipts
//!
//! A receipt is `rlp([status, cumulative_gas_used, logs])` where each log is
//! `[address, [topic, ...], data]`. Scalars use minimal big-endian encoding,
//! so the encoding is an injective function of the logical receipt and its
//! keccak256 hash anchors the notary attestation.
//!
//! The decoder is strict: non-canonical scalar or length encodings, wrong
//! field widths, and trailing bytes are all rejected. A receipt that decodes
//! re-encodes to the identical byte string.

use cosmwasm_std::Uint128;

use crate::error::ContractError;
use crate::hash::keccak256;

/// Event signature of the `Deposited` record emitted by every bridge
/// instance, in EVM ABI notation. Its keccak hash is the log's first topic.
pub const DEPOSITED_EVENT_SIG: &str =
    "Deposited(uint256,address,address,address,address,address,uint256,uint256,(bytes32,bytes32,uint256,address))";

/// Number of 32-byte words in the `Deposited` log data section
const DEPOSITED_DATA_WORDS: usize = 9;

/// First topic of a `Deposited` log
pub fn deposited_topic() -> [u8; 32] {
    keccak256(DEPOSITED_EVENT_SIG.as_bytes())
}

// ============================================================================
// Receipt model
// ============================================================================

/// A single log entry of a transaction receipt
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    /// Emitting contract address
    pub address: [u8; 20],
    /// Ordered 32-byte topics
    pub topics: Vec<[u8; 32]>,
    /// Opaque payload
    pub data: Vec<u8>,
}

/// Execution outcome of a source-chain transaction
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionReceipt {
    /// 1 for success, 0 for failure
    pub status: u64,
    /// Cumulative gas used by the transaction
    pub cumulative_gas_used: u64,
    /// Ordered log entries
    pub logs: Vec<LogEntry>,
}

impl TransactionReceipt {
    /// Canonical RLP encoding
    pub fn encode(&self) -> Vec<u8> {
        let mut payload = Vec::new();
        append_scalar(&mut payload, self.status as u128);
        append_scalar(&mut payload, self.cumulative_gas_used as u128);

        let mut logs_payload = Vec::new();
        for log in &self.logs {
            let mut log_payload = Vec::new();
            append_bytes(&mut log_payload, &log.address);

            let mut topics_payload = Vec::new();
            for topic in &log.topics {
                append_bytes(&mut topics_payload, topic);
            }
            append_list(&mut log_payload, &topics_payload);

            append_bytes(&mut log_payload, &log.data);
            append_list(&mut logs_payload, &log_payload);
        }
        append_list(&mut payload, &logs_payload);

        let mut out = Vec::with_capacity(payload.len() + 4);
        append_list(&mut out, &payload);
        out
    }

    /// keccak256 of the canonical encoding
    pub fn hash(&self) -> [u8; 32] {
        keccak256(&self.encode())
    }

    /// Strict decode of a canonical RLP receipt
    pub fn decode(raw: &[u8]) -> Result<Self, ContractError> {
        let mut outer = Rlp::new(raw);
        let mut receipt = outer.take_list()?;
        outer.expect_end()?;

        let status = receipt.take_scalar_u64("status")?;
        let cumulative_gas_used = receipt.take_scalar_u64("gas used")?;

        let mut logs_rlp = receipt.take_list()?;
        receipt.expect_end()?;

        let mut logs = Vec::new();
        while !logs_rlp.is_empty() {
            let mut log_rlp = logs_rlp.take_list()?;

            let address_bytes = log_rlp.take_bytes()?;
            let address: [u8; 20] = address_bytes
                .try_into()
                .map_err(|_| invalid("log address must be 20 bytes"))?;

            let mut topics_rlp = log_rlp.take_list()?;
            let mut topics = Vec::new();
            while !topics_rlp.is_empty() {
                let topic_bytes = topics_rlp.take_bytes()?;
                let topic: [u8; 32] = topic_bytes
                    .try_into()
                    .map_err(|_| invalid("log topic must be 32 bytes"))?;
                topics.push(topic);
            }

            let data = log_rlp.take_bytes()?.to_vec();
            log_rlp.expect_end()?;

            logs.push(LogEntry {
                address,
                topics,
                data,
            });
        }

        Ok(TransactionReceipt {
            status,
            cumulative_gas_used,
            logs,
        })
    }
}

// ============================================================================
// Deposited log
// ============================================================================

/// Self-describing token metadata carried by a `Deposited` record.
/// An all-zero origin marks the emitting bridge as the asset's home.
#[derive(Clone, Debug, PartialEq)]
pub struct TokenMetadata {
    /// Token name, 32-byte truncated
    pub name: [u8; 32],
    /// Token symbol, 32-byte truncated
    pub symbol: [u8; 32],
    /// Origin chain id (0 = emitted by the asset's home bridge)
    pub origin_chain: u64,
    /// Origin token address (zero = emitted by the asset's home bridge)
    pub origin_address: [u8; 32],
}

/// Parsed `Deposited` log of a source-chain receipt
#[derive(Clone, Debug, PartialEq)]
pub struct DepositedLog {
    /// Bridge contract that emitted the record on the source chain
    pub source_bridge: [u8; 20],
    /// Chain the deposit is destined for
    pub destination_chain: u64,
    /// Bridge instance expected to honor the withdrawal
    pub destination_bridge: [u8; 32],
    /// Depositor on the source chain
    pub sender: [u8; 32],
    /// Receiver on the destination chain
    pub receiver: [u8; 32],
    /// Token debited on the source chain
    pub from_token: [u8; 32],
    /// Token to credit on the destination chain
    pub to_token: [u8; 32],
    /// Transferred amount
    pub amount: Uint128,
    /// Source bridge deposit nonce
    pub nonce: u64,
    /// Token metadata snapshot
    pub metadata: TokenMetadata,
}

impl DepositedLog {
    /// Locate and parse the `Deposited` log of a receipt.
    ///
    /// A receipt without a `Deposited` log, or one emitted by the null
    /// address, fails with `InvalidContractAddress`.
    pub fn find_in(receipt: &TransactionReceipt) -> Result<Self, ContractError> {
        let topic = deposited_topic();
        let log = receipt
            .logs
            .iter()
            .find(|log| log.topics.first() == Some(&topic))
            .ok_or(ContractError::InvalidContractAddress)?;

        if log.address == [0u8; 20] {
            return Err(ContractError::InvalidContractAddress);
        }
        if log.topics.len() != 4 {
            return Err(invalid("deposit log must carry 4 topics"));
        }
        if log.data.len() != DEPOSITED_DATA_WORDS * 32 {
            return Err(invalid("deposit log data must be 9 words"));
        }

        let word = |i: usize| -> [u8; 32] {
            let mut out = [0u8; 32];
            out.copy_from_slice(&log.data[i * 32..(i + 1) * 32]);
            out
        };

        Ok(DepositedLog {
            source_bridge: log.address,
            destination_chain: word_to_u64(&log.topics[1], "destination chain")?,
            destination_bridge: log.topics[2],
            sender: log.topics[3],
            receiver: word(0),
            from_token: word(1),
            to_token: word(2),
            amount: word_to_uint128(&word(3), "amount")?,
            nonce: word_to_u64(&word(4), "nonce")?,
            metadata: TokenMetadata {
                name: word(5),
                symbol: word(6),
                origin_chain: word_to_u64(&word(7), "origin chain")?,
                origin_address: word(8),
            },
        })
    }

    /// Render this record as a receipt log entry (the inverse of `find_in`)
    pub fn to_log_entry(&self) -> LogEntry {
        let mut data = Vec::with_capacity(DEPOSITED_DATA_WORDS * 32);
        data.extend_from_slice(&self.receiver);
        data.extend_from_slice(&self.from_token);
        data.extend_from_slice(&self.to_token);
        data.extend_from_slice(&u128_word(self.amount.u128()));
        data.extend_from_slice(&u64_word(self.nonce));
        data.extend_from_slice(&self.metadata.name);
        data.extend_from_slice(&self.metadata.symbol);
        data.extend_from_slice(&u64_word(self.metadata.origin_chain));
        data.extend_from_slice(&self.metadata.origin_address);

        LogEntry {
            address: self.source_bridge,
            topics: vec![
                deposited_topic(),
                u64_word(self.destination_chain),
                self.destination_bridge,
                self.sender,
            ],
            data,
        }
    }
}

/// Left-pad a u64 into a 32-byte word
pub fn u64_word(value: u64) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[24..].copy_from_slice(&value.to_be_bytes());
    out
}

/// Left-pad a u128 into a 32-byte word
pub fn u128_word(value: u128) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[16..].copy_from_slice(&value.to_be_bytes());
    out
}

fn word_to_u64(word: &[u8; 32], what: &str) -> Result<u64, ContractError> {
    if word[..24].iter().any(|b| *b != 0) {
        return Err(invalid(&format!("{what} exceeds 64 bits")));
    }
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&word[24..]);
    Ok(u64::from_be_bytes(raw))
}

fn word_to_uint128(word: &[u8; 32], what: &str) -> Result<Uint128, ContractError> {
    if word[..16].iter().any(|b| *b != 0) {
        return Err(invalid(&format!("{what} exceeds 128 bits")));
    }
    let mut raw = [0u8; 16];
    raw.copy_from_slice(&word[16..]);
    Ok(Uint128::from(u128::from_be_bytes(raw)))
}

fn invalid(reason: &str) -> ContractError {
    ContractError::InvalidReceipt {
        reason: reason.to_string(),
    }
}

// ============================================================================
// RLP primitives
// ============================================================================

fn append_bytes(out: &mut Vec<u8>, payload: &[u8]) {
    if payload.len() == 1 && payload[0] < 0x80 {
        out.push(payload[0]);
        return;
    }
    append_length(out, payload.len(), 0x80);
    out.extend_from_slice(payload);
}

fn append_list(out: &mut Vec<u8>, payload: &[u8]) {
    append_length(out, payload.len(), 0xc0);
    out.extend_from_slice(payload);
}

fn append_scalar(out: &mut Vec<u8>, value: u128) {
    let raw = value.to_be_bytes();
    let first = raw.iter().position(|b| *b != 0).unwrap_or(raw.len());
    append_bytes(out, &raw[first..]);
}

fn append_length(out: &mut Vec<u8>, len: usize, offset: u8) {
    if len <= 55 {
        out.push(offset + len as u8);
    } else {
        let raw = (len as u64).to_be_bytes();
        let first = raw.iter().position(|b| *b != 0).unwrap_or(raw.len());
        out.push(offset + 55 + (raw.len() - first) as u8);
        out.extend_from_slice(&raw[first..]);
    }
}

/// Strict RLP reader over a byte slice
struct Rlp<'a> {
    buf: &'a [u8],
    pos: usize,
}

enum Item<'a> {
    Bytes(&'a [u8]),
    List(&'a [u8]),
}

impl<'a> Rlp<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Rlp { buf, pos: 0 }
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn expect_end(&self) -> Result<(), ContractError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(invalid("trailing bytes"))
        }
    }

    fn take_bytes(&mut self) -> Result<&'a [u8], ContractError> {
        match self.take_item()? {
            Item::Bytes(payload) => Ok(payload),
            Item::List(_) => Err(invalid("expected byte string, found list")),
        }
    }

    fn take_list(&mut self) -> Result<Rlp<'a>, ContractError> {
        match self.take_item()? {
            Item::List(payload) => Ok(Rlp::new(payload)),
            Item::Bytes(_) => Err(invalid("expected list, found byte string")),
        }
    }

    /// Scalars are byte strings with no leading zero, at most 8 bytes here
    fn take_scalar_u64(&mut self, what: &str) -> Result<u64, ContractError> {
        let payload = self.take_bytes()?;
        if payload.len() > 8 {
            return Err(invalid(&format!("{what} exceeds 64 bits")));
        }
        if payload.first() == Some(&0) {
            return Err(invalid(&format!("{what} has leading zero")));
        }
        let mut raw = [0u8; 8];
        raw[8 - payload.len()..].copy_from_slice(payload);
        Ok(u64::from_be_bytes(raw))
    }

    fn take_item(&mut self) -> Result<Item<'a>, ContractError> {
        let prefix = *self
            .buf
            .get(self.pos)
            .ok_or_else(|| invalid("unexpected end of input"))?;
        self.pos += 1;

        let (is_list, len) = match prefix {
            0x00..=0x7f => return Ok(Item::Bytes(&self.buf[self.pos - 1..self.pos])),
            0x80..=0xb7 => (false, (prefix - 0x80) as usize),
            0xb8..=0xbf => (false, self.take_long_length((prefix - 0xb7) as usize)?),
            0xc0..=0xf7 => (true, (prefix - 0xc0) as usize),
            0xf8..=0xff => (true, self.take_long_length((prefix - 0xf7) as usize)?),
        };

        let payload = self
            .buf
            .get(self.pos..self.pos + len)
            .ok_or_else(|| invalid("length prefix exceeds input"))?;
        self.pos += len;

        if !is_list && payload.len() == 1 && payload[0] < 0x80 {
            return Err(invalid("non-canonical single byte encoding"));
        }
        if is_list {
            Ok(Item::List(payload))
        } else {
            Ok(Item::Bytes(payload))
        }
    }

    fn take_long_length(&mut self, len_of_len: usize) -> Result<usize, ContractError> {
        let raw = self
            .buf
            .get(self.pos..self.pos + len_of_len)
            .ok_or_else(|| invalid("unexpected end of length"))?;
        self.pos += len_of_len;

        if raw.first() == Some(&0) {
            return Err(invalid("length has leading zero"));
        }
        if raw.len() > 8 {
            return Err(invalid("length exceeds 64 bits"));
        }
        let mut padded = [0u8; 8];
        padded[8 - raw.len()..].copy_from_slice(raw);
        let len = u64::from_be_bytes(padded) as usize;
        if len <= 55 {
            return Err(invalid("non-canonical long length"));
        }
        Ok(len)
    }
}
