/// Arexx TL-500 base station transport over a Linux hidraw node
use log::{debug, info};
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::error::Result;

/// Fixed report size for both directions of the TL-500 protocol.
pub const FRAME_LEN: usize = 64;

/// Report command byte requesting one stored measurement.
const CMD_READ_DATA: u8 = 3;

/// Handle to a connected TL-500 base station.
///
/// Speaks the report protocol over the kernel hidraw node: write a
/// 64-byte readout request, read the 64-byte response. Byte 1 of the
/// response is zero when the station has nothing new to deliver.
pub struct Tl500 {
    path: PathBuf,
    file: File,
}

impl Tl500 {
    /// Open the device node.
    pub async fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .await?;
        info!("connected to TL-500 at {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Request one frame from the station.
    ///
    /// Returns `Ok(None)` when the station reports no new data. An I/O
    /// failure usually means the device was unplugged; the caller should
    /// reopen it.
    pub async fn read_frame(&mut self) -> Result<Option<[u8; FRAME_LEN]>> {
        let mut request = [0u8; FRAME_LEN];
        request[0] = CMD_READ_DATA;
        self.file.write_all(&request).await?;

        let mut frame = [0u8; FRAME_LEN];
        self.file.read_exact(&mut frame).await?;

        if frame[1] == 0 {
            debug!("no new data from {}", self.path.display());
            return Ok(None);
        }

        debug!("received frame from {}", self.path.display());
        Ok(Some(frame))
    }
}
