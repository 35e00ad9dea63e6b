// Copyright 2025 the lzav crate authors
// Based on the LZAV compression format by Aleksey Vaneev
// Use of this source code is governed by the MIT license
// that can be found in the LICENSE file.

use crate::constants::*;

/// Words in the on-stack hash table (16 KiB). Larger tables go to the
/// external buffer or the heap.
const STACK_TABLE_WORDS: usize = 4096;

/// Returns the destination capacity required to compress `src_len` bytes.
///
/// The result is always at least 8 and covers the worst case of fully
/// incompressible input (literal-only stream plus the prefix byte).
pub fn compress_bound(src_len: usize) -> usize {
    src_len + src_len * 3 / LIT_LEN + 8
}

/// Compress `src` into `dst` using the default, internally managed hash
/// table.
///
/// Returns the number of bytes written, or 0 if `src` is empty or `dst`
/// is smaller than [`compress_bound`]`(src.len())`.
pub fn compress_default(src: &[u8], dst: &mut [u8]) -> usize {
    compress(src, dst, None)
}

/// Compress `src` into `dst`.
///
/// The output is a raw format-1 stream: no length header, no identifier,
/// no checksum. Compressed output of the same source may differ between
/// library versions; only decompression is stable across versions.
///
/// `ext_buf` optionally supplies the hash-table scratch, useful when
/// compressing many buffers in a row: a power-of-two word count between
/// 64 (256 bytes) and 262,144 (1 MiB) covers every source size, and the
/// same buffer can be reused for any smaller source. A buffer smaller
/// than the table sized for this source is ignored and the table is
/// allocated internally instead. The buffer is not synchronized; do not
/// share it across concurrent calls.
///
/// Returns the number of bytes written, or 0 if `src` is empty, longer
/// than `u32::MAX` bytes, or `dst` is smaller than
/// [`compress_bound`]`(src.len())`.
pub fn compress(src: &[u8], dst: &mut [u8], ext_buf: Option<&mut [u32]>) -> usize {
    let srcl = src.len();

    if srcl == 0 || srcl > u32::MAX as usize || dst.len() < compress_bound(srcl) {
        return 0;
    }

    if srcl <= LIT_FIN {
        // Very short source: prefix, one literal header, payload, zero pad.
        dst[0] = FMT_CUR << 4 | REF_MIN as u8;
        dst[1] = srcl as u8;
        dst[2..2 + LIT_FIN].fill(0);
        dst[2..2 + srcl].copy_from_slice(src);
        return 2 + LIT_FIN;
    }

    // Size the hash table: 16 bytes per two-tuple bucket.
    let mut htcap = 1usize << 8;
    while htcap != (1 << 16) && htcap * 4 < srcl {
        htcap <<= 1;
    }
    let table_words = htcap * 4;

    let mut stack_table = [0u32; STACK_TABLE_WORDS];
    let mut heap_table;
    let table: &mut [u32] = match ext_buf {
        Some(buf) if buf.len() >= table_words => &mut buf[..table_words],
        _ if table_words <= STACK_TABLE_WORDS => &mut stack_table[..table_words],
        _ => {
            heap_table = vec![0u32; table_words];
            &mut heap_table[..]
        }
    };

    let ipe = srcl - LIT_FIN; // Tail threshold: keep LIT_FIN literals.
    let ipet = ipe.saturating_sub(REF_MIN - 1); // Hashing threshold.

    let mut ip = REF_MIN; // Skip the first bytes, the lazy probe looks back.
    let mut ipa = 0usize; // Literal run anchor.
    let mut op = 0usize; // Destination write position.
    let mut carry: Option<usize> = None; // Header index awaiting offset bits.
    let mut mavg: i32 = 100 << 22; // Running match-rate average, fixed point.
    let mut rndb = 0usize; // Dither bit for the skip heuristic.

    // Prime both tuples of every bucket with a real position so the first
    // hit can never point at unhashed bytes.
    let iniv = if ip < ipet { load32(src, ip) } else { 0 };
    for bucket in table.chunks_exact_mut(4) {
        bucket[0] = iniv;
        bucket[1] = REF_MIN as u32;
        bucket[2] = iniv;
        bucket[3] = REF_MIN as u32;
    }

    dst[op] = FMT_CUR << 4 | REF_MIN as u8;
    op += 1;

    while ip < ipet {
        let iw1 = load32(src, ip);
        let iw2 = load16(src, ip + 4);
        let hval = hash(iw1, iw2);

        let ipo = ip;
        let bi = ((hval >> 4) as usize & (htcap - 1)) * 4;
        let bucket = &mut table[bi..bi + 4];

        // Two-way bucket lookup: a hit needs all six bytes to match. On a
        // miss the least useful tuple is replaced with the current
        // position.
        let mut wpo = bucket[1] as usize;
        let mut hit = false;
        if iw1 == bucket[0] {
            if iw2 == load16(src, wpo + 4) {
                hit = true;
            } else if iw1 != bucket[2] {
                bucket[2] = iw1;
                bucket[3] = ipo as u32;
            } else {
                wpo = bucket[3] as usize;
                if iw2 == load16(src, wpo + 4) {
                    hit = true;
                } else {
                    bucket[0] = iw1;
                    bucket[1] = ipo as u32;
                }
            }
        } else if iw1 != bucket[2] {
            bucket[2] = iw1;
            bucket[3] = ipo as u32;
        } else {
            wpo = bucket[3] as usize;
            if iw2 == load16(src, wpo + 4) {
                hit = true;
            } else {
                bucket[0] = iw1;
                bucket[1] = ipo as u32;
            }
        }

        if !hit {
            mavg -= mavg >> 11;

            if mavg < (200 << 15) && ip != ipa {
                // Low recent match rate: skip ahead, dithered so the probe
                // positions decorrelate from the data period.
                ip += 2 | rndb;
                rndb = ipo & 1;

                if mavg < (130 << 15) {
                    ip += 1;

                    if mavg < (100 << 15) {
                        ip += (100 - (mavg >> 15)) as usize; // Gradually faster.
                    }
                }
                continue;
            }

            ip += 1;
            continue;
        }

        let d = ipo - wpo;

        if d <= 7 || d >= WIN_LEN {
            // Tiny offsets are not worth a reference block; out-of-window
            // entries are refreshed in place.
            if d >= WIN_LEN {
                if bucket[1] as usize == wpo {
                    bucket[1] = ipo as u32;
                } else {
                    bucket[3] = ipo as u32;
                }
            }

            ip += 1;
            continue;
        }

        if d > REF_LEN {
            // Keep long-range entries fresh; matches within REF_LEN are
            // left alone or same-byte runs would flush the bucket.
            if iw1 != bucket[0] {
                bucket[2] = bucket[0];
                bucket[3] = bucket[1];
                bucket[0] = iw1;
            }
            bucket[1] = ipo as u32;
        }

        // The copy must not reach data the decompressor has not written
        // yet, and must leave LIT_FIN literals at the end.
        let mut ml = d.min(REF_LEN);
        if ip + ml > ipe {
            ml = ipe - ip;
        }

        let mut lc = ip - ipa;
        let mut rc = 0;

        if lc != 0 && lc < REF_MIN {
            // Short pending literal run: try a match that starts early
            // enough to absorb it.
            let rc2 = match_len(&src[ip - lc..], &src[wpo - lc..], ml);

            if rc2 >= REF_MIN {
                rc = rc2;
                ip -= lc;
                lc = 0;
            }
        }

        if rc == 0 {
            rc = REF_MIN + match_len(&src[ip + REF_MIN..], &src[wpo + REF_MIN..], ml - REF_MIN);
        }

        op = write_block(dst, op, &src[ipa..ipa + lc], rc, d, &mut carry, REF_MIN);

        ip += rc;
        ipa = ip;
        mavg += (((rc as i32) << 22) - mavg) >> 10;
    }

    write_fin(dst, op, &src[ipa..])
}

/// Compress `src` into a freshly allocated buffer.
///
/// Convenience wrapper over [`compress_default`]; an empty source yields
/// an empty vector.
pub fn compress_to_vec(src: &[u8]) -> Vec<u8> {
    let mut dst = vec![0u8; compress_bound(src.len())];
    let n = compress_default(src, &mut dst);
    dst.truncate(n);
    dst
}

/// Counts the leading bytes equal between `p1` and `p2`, at most `ml`.
///
/// Both slices must be at least `ml` bytes long.
#[inline]
fn match_len(p1: &[u8], p2: &[u8], ml: usize) -> usize {
    let p1 = &p1[..ml];
    let p2 = &p2[..ml];
    let mut i = 0;

    while i + 8 <= ml {
        let vd = load64(p1, i) ^ load64(p2, i);
        if vd != 0 {
            return i + (vd.trailing_zeros() >> 3) as usize;
        }
        i += 8;
    }

    while i < ml {
        if p1[i] != p2[i] {
            return i;
        }
        i += 1;
    }

    ml
}

/// Hashes the six bytes `(iw1, iw2)` at the scan cursor.
///
/// The mixing follows the komihash construct; the value is only an index
/// and is never serialized, so host endianness does not matter.
#[inline]
fn hash(iw1: u32, iw2: u16) -> u32 {
    let hm = (0x243F_6A88u32 ^ iw1) as u64 * (0x85A3_08D3u32 ^ iw2 as u32) as u64;
    (hm ^ (hm >> 32)) as u32
}

/// Writes one literal-run + reference pair at `op` and returns the new
/// write position.
///
/// `lit` is the pending literal run (may be empty), `rc` the reference
/// length (`>= mref`), `d` the reference offset in `8..WIN_LEN`. The two
/// low offset bits are carried in the header of the trailing literal
/// block when there is one, otherwise in the header `carry` points at; a
/// 24-bit reference block re-arms `carry` with its own header position.
fn write_block(
    dst: &mut [u8],
    mut op: usize,
    mut lit: &[u8],
    rc: usize,
    mut d: usize,
    carry: &mut Option<usize>,
    mref: usize,
) -> usize {
    while lit.len() > LIT_LEN {
        // Literal length overflow: full-size chunk with a 3-byte header.
        dst[op] = 0;
        dst[op + 1] = 255;
        dst[op + 2] = 255;
        op += 3;
        dst[op..op + LIT_LEN].copy_from_slice(&lit[..LIT_LEN]);
        op += LIT_LEN;
        lit = &lit[LIT_LEN..];
    }

    if !lit.is_empty() {
        let cv = ((d & 3) << 6) as u8;
        d >>= 2;
        *carry = None;

        let lc = lit.len();
        if lc < 16 {
            dst[op] = cv | lc as u8;
            op += 1;
        } else if lc < 16 + 255 {
            dst[op] = cv;
            dst[op + 1] = (lc - 16) as u8;
            op += 2;
        } else {
            dst[op] = cv;
            dst[op + 1] = 255;
            dst[op + 2] = (lc - 16 - 255) as u8;
            op += 3;
        }

        dst[op..op + lc].copy_from_slice(lit);
        op += lc;
    } else if let Some(cb) = carry.take() {
        dst[cb] |= ((d & 3) << 6) as u8;
        d >>= 2;
    }

    let rc = rc + 1 - mref;

    if d < (1 << 10) {
        if rc < 16 {
            dst[op] = ((d & 3) << 6) as u8 | 0x10 | rc as u8;
            dst[op + 1] = (d >> 2) as u8;
            return op + 2;
        }

        dst[op] = ((d & 3) << 6) as u8 | 0x10;
        dst[op + 1] = (d >> 2) as u8;
        dst[op + 2] = (rc - 16) as u8;
        return op + 3;
    }

    if d < (1 << 18) {
        if rc < 16 {
            dst[op] = ((d & 3) << 6) as u8 | 0x20 | rc as u8;
            store16(dst, op + 1, (d >> 2) as u16);
            return op + 3;
        }

        dst[op] = ((d & 3) << 6) as u8 | 0x20;
        store16(dst, op + 1, (d >> 2) as u16);
        dst[op + 3] = (rc - 16) as u8;
        return op + 4;
    }

    // 24-bit offset: bits 6-7 of this header belong to the next
    // reference's offset and are patched in by a later call.
    *carry = Some(op);

    if rc < 16 {
        dst[op] = 0x30 | rc as u8;
        store24(dst, op + 1, d as u32);
        return op + 4;
    }

    dst[op] = 0x30;
    store24(dst, op + 1, d as u32);
    dst[op + 4] = (rc - 16) as u8;
    op + 5
}

/// Writes the finishing literal block(s) at `op` and returns the stream
/// length.
///
/// Chunks are cut so the very last block keeps `1..=15` literals and at
/// least LIT_FIN of them.
fn write_fin(dst: &mut [u8], mut op: usize, mut lit: &[u8]) -> usize {
    while lit.len() > 15 {
        let mut wc = lit.len() - LIT_FIN; // Leave literals for the final block.

        if wc < 16 {
            dst[op] = wc as u8;
            op += 1;
        } else {
            wc = wc.min(LIT_LEN);

            if wc < 16 + 255 {
                dst[op] = 0;
                dst[op + 1] = (wc - 16) as u8;
                op += 2;
            } else {
                dst[op] = 0;
                dst[op + 1] = 255;
                dst[op + 2] = (wc - 16 - 255) as u8;
                op += 3;
            }
        }

        dst[op..op + wc].copy_from_slice(&lit[..wc]);
        op += wc;
        lit = &lit[wc..];
    }

    dst[op] = lit.len() as u8;
    op += 1;
    dst[op..op + lit.len()].copy_from_slice(lit);
    op + lit.len()
}

#[inline]
fn load16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

#[inline]
fn load32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

#[inline]
fn load64(data: &[u8], offset: usize) -> u64 {
    u64::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
        data[offset + 4],
        data[offset + 5],
        data[offset + 6],
        data[offset + 7],
    ])
}

#[inline]
fn store16(data: &mut [u8], offset: usize, v: u16) {
    data[offset..offset + 2].copy_from_slice(&v.to_le_bytes());
}

#[inline]
fn store24(data: &mut [u8], offset: usize, v: u32) {
    let bytes = v.to_le_bytes();
    data[offset] = bytes[0];
    data[offset + 1] = bytes[1];
    data[offset + 2] = bytes[2];
}
