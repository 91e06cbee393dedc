//! # calldata-abi
//!
//! Ethereum contract ABI calldata codec.
//!
//! ## Features
//!
//! - **Codec**: closed type tree for every ABI type, built once and reused
//! - **Method**: selector-prefixed call encoding and return value decoding
//! - **Optimizer**: optional deduplication of identical dynamic tails
//! - **Schema**: codec construction from JSON interface descriptions
//!
//! ## Quick Start
//!
//! ```rust
//! use calldata_abi::{Contract, DecodeOptions, EncodeOptions, Value};
//!
//! let abi = r#"{
//!     "type": "function",
//!     "name": "f",
//!     "inputs": [{"name": "xs", "type": "string[]"}],
//!     "outputs": []
//! }"#;
//! let contract = Contract::from_json(abi)?;
//! let method = contract.resolve(Some("f"))?;
//!
//! let args = Value::List(vec![Value::List(vec![
//!     Value::from("five"),
//!     Value::from("six"),
//!     Value::from("seven"),
//! ])]);
//! let calldata = method.encode(&args, &EncodeOptions::default())?;
//! assert_eq!(method.decode(&calldata, &DecodeOptions::default())?, args);
//! # Ok::<(), calldata_abi::AbiError>(())
//! ```
//!
//! ## Optimized encoding
//!
//! ```rust
//! use calldata_abi::{Codec, EncodeOptions, Value};
//!
//! let array = Codec::dynamic_array(Codec::UInt(256));
//! let codec = Codec::tuple([("a", array.clone()), ("b", array)])?;
//! let xs = Value::List(vec![Value::from(100u64), Value::from(150u64)]);
//! let args = Value::List(vec![xs.clone(), xs]);
//!
//! let plain = codec.encode(&args, &EncodeOptions::default())?;
//! let optimized = codec.encode(&args, &EncodeOptions::optimized())?;
//! assert!(optimized.len() < plain.len());
//! # Ok::<(), calldata_abi::AbiError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod codec;
mod contract;
mod decode;
mod error;
mod layout;
mod method;
mod optimizer;
mod options;
mod schema;
mod selector;
mod value;

pub use codec::elementary::parse_hex;
pub use codec::{ArrayCodec, ArrayLength, Codec, TupleCodec, TupleField};
pub use contract::Contract;
pub use error::AbiError;
pub use method::Method;
pub use options::{DecodeOptions, EncodeOptions, TupleShape};
pub use schema::{parse_abi, parse_type, tuple_from_items, DataItem, MethodAbi};
pub use selector::{keccak256, Selector};
pub use value::Value;

// Re-export primitives for convenience
pub use calldata_primitives::{Address, Integer, H256, U256};
