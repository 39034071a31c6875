//! Line-delimited JSON reader for server-streaming endpoints.

use super::ClientError;
use crate::objects::{ChannelEventUpdate, StreamFrame};

/// An open channel event subscription.
///
/// Frames are decoded one at a time in arrival order; no batching.
pub struct ChannelEventStream {
    response: reqwest::Response,
    buffer: Vec<u8>,
}

impl ChannelEventStream {
    pub(crate) fn new(response: reqwest::Response) -> Self {
        Self {
            response,
            buffer: Vec::new(),
        }
    }

    /// Wait for the next update.
    ///
    /// Returns `Ok(None)` once the gateway closes the stream cleanly.
    pub async fn next_update(&mut self) -> Result<Option<ChannelEventUpdate>, ClientError> {
        loop {
            if let Some(line) = take_line(&mut self.buffer) {
                if let Some(update) = decode_frame(&line)? {
                    return Ok(Some(update));
                }
                continue;
            }

            match self.response.chunk().await? {
                Some(chunk) => self.buffer.extend_from_slice(&chunk),
                None => {
                    let rest = std::mem::take(&mut self.buffer);
                    return decode_frame(&rest);
                }
            }
        }
    }
}

/// Split the first complete line off the buffer.
fn take_line(buffer: &mut Vec<u8>) -> Option<Vec<u8>> {
    let pos = buffer.iter().position(|b| *b == b'\n')?;
    let mut line: Vec<u8> = buffer.drain(..=pos).collect();
    line.pop();
    Some(line)
}

/// Decode one frame. Blank lines and frames without a result yield `None`.
fn decode_frame(line: &[u8]) -> Result<Option<ChannelEventUpdate>, ClientError> {
    let line = line.trim_ascii();
    if line.is_empty() {
        return Ok(None);
    }
    let frame: StreamFrame<ChannelEventUpdate> = serde_json::from_slice(line)?;
    if let Some(err) = frame.error {
        return Err(ClientError::Stream {
            code: err.code,
            message: err.message,
        });
    }
    Ok(frame.result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::UpdateType;

    #[test]
    fn test_take_line_keeps_partial_tail() {
        let mut buffer = b"{\"a\":1}\n{\"b\":".to_vec();
        assert_eq!(take_line(&mut buffer).unwrap(), b"{\"a\":1}".to_vec());
        assert!(take_line(&mut buffer).is_none());
        assert_eq!(buffer, b"{\"b\":".to_vec());
    }

    #[test]
    fn test_decode_frame() {
        let frame = br#"{"result":{"type":"INACTIVE_CHANNEL","inactive_channel":{"funding_txid_bytes":"q80=","output_index":7}}}"#;
        let update = decode_frame(frame).unwrap().unwrap();
        assert_eq!(update.update_type, UpdateType::InactiveChannel);
        let point = update.inactive_channel.unwrap();
        assert_eq!(point.outpoint().unwrap(), "cdab:7");

        assert!(decode_frame(b"  \r").unwrap().is_none());

        let err = decode_frame(br#"{"error":{"code":2,"message":"boom"}}"#).unwrap_err();
        assert!(matches!(err, ClientError::Stream { code: 2, .. }));
    }
}
