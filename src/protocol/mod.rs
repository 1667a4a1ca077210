//! Protocol Module
//!
//! Typed requests and responses between the HTTP layer and the engine.
//!
//! ## Commands
//! | Command  | HTTP              | Success             | Failure        |
//! |----------|-------------------|---------------------|----------------|
//! | List     | `GET /db`         | 200 mapping         |                |
//! | Get      | `GET /db/{id}`    | 200 `{id, data}`    | 404            |
//! | Create   | `POST /db`        | 200 `{id, data}`    | 400            |
//! | Update   | `PUT /db/{id}`    | 200 `{id, data}`    | 404, 400       |
//! | Delete   | `DELETE /db/{id}` | 204 empty           | 404            |
//!
//! Failures carry a short plain-text body. Malformed ids are treated the same
//! as unknown ones.

mod command;
mod response;
mod codec;

pub use command::{Command, CommandType};
pub use response::{Response, Status, INVALID_PAYLOAD_MESSAGE, NOT_FOUND_MESSAGE};
pub use codec::{decode_id, decode_payload, MAX_PAYLOAD_SIZE};
