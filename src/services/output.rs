use crate::domain::models::JsonOut;
use serde::Serialize;
use std::io::Write;

/// Writes `data` either as the `{ok, data}` JSON envelope or one text line per item.
pub fn write_out<W: Write, T: Serialize>(
    w: &mut W,
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        writeln!(w, "{}", serde_json::to_string_pretty(&JsonOut { ok: true, data })?)?;
    } else {
        for d in data {
            writeln!(w, "{}", row(d))?;
        }
    }
    Ok(())
}

pub fn write_one<W: Write, T: Serialize>(
    w: &mut W,
    json: bool,
    data: T,
    text: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        writeln!(w, "{}", serde_json::to_string_pretty(&JsonOut { ok: true, data })?)?;
    } else {
        writeln!(w, "{}", text(&data))?;
    }
    Ok(())
}

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    write_out(&mut std::io::stdout().lock(), json, data, row)
}

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    text: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    write_one(&mut std::io::stdout().lock(), json, data, text)
}
