/*
 * ZeepScout - Zeepkist Bug-Report Log Scout
 * File Path: src/chunk.rs
 * Responsibility: Greedy line packer for size-capped transport messages.
 */

/// Split `block` into ordered chunks, each a newline-joined run of complete
/// trimmed lines whose length stays strictly below `limit`.
///
/// Lines are never split: a single line that alone exceeds `limit` becomes
/// its own oversized chunk, which the transport layer may flag but must not
/// truncate. Concatenating the chunks' lines in order reproduces the input's
/// trimmed line sequence; nothing is invented or dropped.
pub fn chunk_lines(block: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();
    // Running length including one terminator per line, mirroring what the
    // sealed chunk plus its trailing newline would occupy on the wire.
    let mut buffer_len = 0usize;

    for line in block.lines() {
        let line = line.trim();
        if !buffer.is_empty() && buffer_len + line.len() >= limit {
            chunks.push(buffer.join("\n"));
            buffer.clear();
            buffer_len = 0;
        }
        buffer.push(line);
        buffer_len += line.len() + 1;
    }

    if !buffer.is_empty() {
        chunks.push(buffer.join("\n"));
    }

    chunks
}
