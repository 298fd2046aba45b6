//! On-disk formats for exported mesh records
//!
//! Records are written either as pretty JSON, or (when minimizing) as a
//! `TMSH` magic followed by a bitcode-encoded [`MeshRecord`].

use anyhow::{Context, Result};
use std::io::Write;

use tessera_shared::{MeshDatas, MeshRecord};

/// Magic bytes at the start of a minimized mesh file
pub const MESH_MAGIC: &[u8; 4] = b"TMSH";

/// Extension for minimized (binary) records
pub const BINARY_EXTENSION: &str = "tmesh";
/// Extension for JSON records
pub const JSON_EXTENSION: &str = "json";

/// File extension matching the `minimize` setting
pub fn extension(minimize: bool) -> &'static str {
    if minimize {
        BINARY_EXTENSION
    } else {
        JSON_EXTENSION
    }
}

/// Write a mesh record as pretty JSON
pub fn write_mesh_json<W: Write>(w: &mut W, record: &MeshRecord) -> Result<()> {
    serde_json::to_writer_pretty(&mut *w, record).context("Failed to serialize mesh record")?;
    w.write_all(b"\n")?;
    Ok(())
}

/// Write a mesh record in the minimized binary container
pub fn write_mesh_binary<W: Write>(w: &mut W, record: &MeshRecord) -> Result<()> {
    w.write_all(MESH_MAGIC)?;
    w.write_all(&bitcode::encode(record))?;
    Ok(())
}

/// Decode a minimized mesh file
pub fn read_mesh_binary(bytes: &[u8]) -> Result<MeshRecord> {
    decode_tmsh(bytes)
}

fn decode_tmsh<T: bitcode::DecodeOwned>(bytes: &[u8]) -> Result<T> {
    if bytes.len() < MESH_MAGIC.len() || &bytes[..MESH_MAGIC.len()] != MESH_MAGIC {
        anyhow::bail!("Invalid TMSH magic bytes");
    }

    bitcode::decode(&bytes[MESH_MAGIC.len()..])
        .map_err(|e| anyhow::anyhow!("Failed to decode TMSH data: {}", e))
}

/// Write a single record in the format selected by `minimize`
pub fn write_mesh<W: Write>(w: &mut W, record: &MeshRecord, minimize: bool) -> Result<()> {
    if minimize {
        write_mesh_binary(w, record)
    } else {
        write_mesh_json(w, record)
    }
}

/// Write several records as one `mesh_datas` container
pub fn write_mesh_datas<W: Write>(w: &mut W, datas: &MeshDatas, minimize: bool) -> Result<()> {
    if minimize {
        w.write_all(MESH_MAGIC)?;
        w.write_all(&bitcode::encode(datas))?;
    } else {
        serde_json::to_writer_pretty(&mut *w, datas)
            .context("Failed to serialize mesh container")?;
        w.write_all(b"\n")?;
    }
    Ok(())
}

/// Decode a minimized `mesh_datas` container
pub fn read_mesh_datas_binary(bytes: &[u8]) -> Result<MeshDatas> {
    decode_tmsh(bytes)
}
