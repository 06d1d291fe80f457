//! True magic-bitboard sliding attack lookup.
//!
//! For each square and each of {rook, bishop} a magic entry holds the relevant-occupancy
//! mask, a 64-bit magic multiplier, a right-shift amount, and an offset into a flat
//! attack table. The magic numbers below are well-known public values; table
//! construction is verified at first use against [`ray_walk_attacks`], the permanent
//! on-the-fly oracle, and panics identifying the offending square on any collision.

use std::sync::LazyLock;

const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Walks every direction one step at a time, stopping at the first blocker (inclusive).
/// Used both to build the magic tables and, permanently, as the collision oracle.
pub(crate) fn ray_walk_attacks(square: usize, occupancy: u64, dirs: &[(i8, i8)]) -> u64 {
    let rank = (square / 8) as i8;
    let file = (square % 8) as i8;
    let mut attacks = 0u64;
    for &(dr, df) in dirs {
        let mut r = rank + dr;
        let mut f = file + df;
        while (0..8).contains(&r) && (0..8).contains(&f) {
            let sq = (r * 8 + f) as usize;
            attacks |= 1u64 << sq;
            if occupancy & (1u64 << sq) != 0 {
                break;
            }
            r += dr;
            f += df;
        }
    }
    attacks
}

fn in_bounds(r: i8, f: i8) -> bool {
    (0..8).contains(&r) && (0..8).contains(&f)
}

/// A ray's final square is always the edge of the board: occupancy there never changes
/// where the ray stops, so the relevant-occupancy mask excludes it.
fn relevant_mask(square: usize, dirs: &[(i8, i8)]) -> u64 {
    let rank = (square / 8) as i8;
    let file = (square % 8) as i8;
    let mut mask = 0u64;
    for &(dr, df) in dirs {
        let mut r = rank + dr;
        let mut f = file + df;
        while in_bounds(r, f) {
            if !in_bounds(r + dr, f + df) {
                break;
            }
            mask |= 1u64 << (r * 8 + f);
            r += dr;
            f += df;
        }
    }
    mask
}

fn index_to_occupancy(index: usize, mask: u64) -> u64 {
    let mut result = 0u64;
    let mut m = mask;
    let mut bit = 0;
    while m != 0 {
        let sq = m.trailing_zeros();
        m &= m - 1;
        if index & (1 << bit) != 0 {
            result |= 1u64 << sq;
        }
        bit += 1;
    }
    result
}

struct MagicEntry {
    mask: u64,
    magic: u64,
    shift: u8,
    offset: usize,
}

struct MagicTable {
    entries: [MagicEntry; 64],
    attacks: Vec<u64>,
}

impl MagicTable {
    fn build(magics: &[u64; 64], bits: &[u8; 64], dirs: &[(i8, i8)], kind: &str) -> Self {
        #[cfg(feature = "logging")]
        log::debug!("building {kind} magic attack table");
        let mut offset = 0usize;
        let mut offsets = [0usize; 64];
        for sq in 0..64 {
            offsets[sq] = offset;
            offset += 1 << bits[sq];
        }
        let mut attacks = vec![0u64; offset];

        for sq in 0..64 {
            let mask = relevant_mask(sq, dirs);
            let magic = magics[sq];
            let shift = 64 - bits[sq];
            let n = 1usize << bits[sq];
            for i in 0..n {
                let occ = index_to_occupancy(i, mask);
                let reference = ray_walk_attacks(sq, occ, dirs);
                let index = ((occ.wrapping_mul(magic)) >> shift) as usize;
                let slot = &mut attacks[offsets[sq] + index];
                if *slot != 0 && *slot != reference {
                    panic!(
                        "magic bitboard collision building {kind} table at square {sq}: \
                         index {index} maps to two different attack sets"
                    );
                }
                *slot = reference;
            }
        }

        let entries = std::array::from_fn(|sq| MagicEntry {
            mask: relevant_mask(sq, dirs),
            magic: magics[sq],
            shift: 64 - bits[sq],
            offset: offsets[sq],
        });

        MagicTable { entries, attacks }
    }

    #[inline]
    fn attacks(&self, square: usize, occupancy: u64) -> u64 {
        let entry = &self.entries[square];
        let relevant = occupancy & entry.mask;
        let index = (relevant.wrapping_mul(entry.magic) >> entry.shift) as usize;
        self.attacks[entry.offset + index]
    }
}

// Public-domain magic constants (as popularised by the Chess Programming Wiki / Stockfish
// lineage); reproduced here rather than searched for at startup, per spec.
#[rustfmt::skip]
const ROOK_MAGICS: [u64; 64] = [
    0x4080_0020_4000_1480, 0x0040_0010_0140_2000, 0x0300_2000_1810_4100, 0x2100_0409_0110_0120,
    0x8a00_0600_0408_2070, 0x0080_0144_0002_0080, 0x1100_2500_208a_0004, 0x0900_0042_2201_8100,
    0x0208_8002_28c0_0081, 0x2280_4010_0340_2000, 0x0008_8010_0020_0184, 0x0001_0020_1000_0900,
    0x0182_0006_0010_6008, 0x2058_8004_0080_0200, 0x0004_8002_0080_0900, 0x052d_0012_0040_a100,
    0x0540_0880_0080_24c1, 0x2000_8480_4002_2000, 0x0400_4100_1100_6000, 0x0040_a100_3001_0108,
    0x1204_8080_0800_0402, 0x0802_8080_0400_2201, 0x1002_8080_5200_0500, 0x0004_0a00_2112_4184,
    0x0640_0128_8008_8040, 0x8410_4000_8020_008a, 0x0400_2008_8010_0080, 0x2001_0121_0009_1004,
    0x1200_0d01_0008_0010, 0x6004_0004_0120_1008, 0x7500_aa04_0008_4110, 0x0100_0052_0004_0981,
    0x0040_8040_0280_0020, 0x0470_0020_0640_0240, 0x0001_2000_8080_1000, 0x0000_0812_0200_2040,
    0x00c0_8044_0080_0800, 0x9000_800a_0080_0400, 0x0001_0004_0100_0600, 0x0042_1088_ca00_2401,
    0x0000_c000_228d_8000, 0x6410_0420_1440_4001, 0x1002_0040_8226_0014, 0x206a_0088_11c2_0021,
    0x0002_0018_1022_0024, 0x2001_0200_0400_8080, 0x1000_0801_100c_001a, 0x0048_0082_5402_0011,
    0x48FF_FE99_FECF_AA00, 0x48FF_FE99_FECF_AA00, 0x497F_FFAD_FF9C_2E00, 0x613F_FFDD_FFCE_9200,
    0xffff_ffe9_ffe7_ce00, 0xffff_fff5_fff3_e600, 0x0003_ff95_e5e6_a4c0, 0x510F_FFF5_F63C_96A0,
    0xEBFF_FFB9_FF9F_C526, 0x61FF_FEDD_FEED_AEAE, 0x53BF_FFED_FFDE_B1A2, 0x127F_FFB9_FFDF_B5F6,
    0x411F_FFDD_FFDB_F4D6, 0x0822_0024_0810_4502, 0x0003_ffef_27ee_be74, 0x7645_FFFE_CBFE_A79E,
];

#[rustfmt::skip]
const BISHOP_MAGICS: [u64; 64] = [
    0xffed_f9fd_7cfc_ffff, 0xfc09_6285_4a77_f576, 0x0012_2808_c102_a004, 0x2851_2400_8240_0440,
    0x0011_1040_1100_0202, 0x0008_2208_2000_0010, 0xfc0a_66c6_4a7e_f576, 0x7ffd_fdfc_bd79_ffff,
    0xfc08_46a6_4a34_fff6, 0xfc08_7a87_4a3c_f7f6, 0x0009_8802_0420_a000, 0x8000_4404_0080_8200,
    0x208c_8450_c001_3407, 0x1980_1105_2010_8030, 0xfc08_64ae_59b4_ff76, 0x3c08_60af_4b35_ff76,
    0x73C0_1AF5_6CF4_CFFB, 0x41A0_1CFA_D64A_AFFC, 0x0604_0002_04a2_0202, 0x0002_8208_0602_4000,
    0x008a_0024_2201_0201, 0x2082_0040_8801_0802, 0x7c0c_028f_5b34_ff76, 0xfc0a_028e_5ab4_df76,
    0x0810_0420_d104_1080, 0x0904_5100_0210_0100, 0x0202_2808_0406_4403, 0x004c_0040_0c03_0082,
    0x0602_0010_0200_5011, 0x7209_0200_c108_9000, 0x4211_4104_2400_8805, 0x0002_8484_2126_0804,
    0xc001_0412_1121_2004, 0x0208_0188_0004_4800, 0x0080_2064_1058_0800, 0x0000_2011_0008_0084,
    0x0208_0034_0009_4100, 0x2190_4102_0000_4058, 0x0188_8214_0180_8080, 0x2006_0a02_0000_c4c0,
    0xDCEF_D9B5_4BFC_C09F, 0xF95F_FA76_5AFD_602B, 0x200a_1041_1000_2040, 0x0800_000c_0831_0c00,
    0x0218_0401_0a01_0400, 0x1092_2004_0022_4100, 0x43ff_9a5c_f4ca_0c01, 0x4BFF_CD8E_7C58_7601,
    0xfc0f_f286_5334_f576, 0xfc0b_f6ce_5924_f576, 0x8052_2060_8c30_0001, 0x2084_1050_4202_0400,
    0xe018_8010_2206_0220, 0x0001_1220_4901_0200, 0xc3ff_b7dc_36ca_8c89, 0xc3ff_8a54_f4ca_2c89,
    0xffff_fcfc_fd79_edff, 0xfc08_63fc_cb14_7576, 0x40a0_0400_6213_3000, 0x0142_0280_0084_0400,
    0x0009_0900_1006_1200, 0x0800_8445_2810_0308, 0xfc08_7e8e_4bb2_f736, 0x43ff_9e4e_f4ca_2c89,
];

#[rustfmt::skip]
const ROOK_BITS: [u8; 64] = [
    12, 11, 11, 11, 11, 11, 11, 12,
    11, 10, 10, 10, 10, 10, 10, 11,
    11, 10, 10, 10, 10, 10, 10, 11,
    11, 10, 10, 10, 10, 10, 10, 11,
    11, 10, 10, 10, 10, 10, 10, 11,
    11, 10, 10, 10, 10, 10, 10, 11,
    10, 9, 9, 9, 9, 9, 9, 10,
    11, 10, 10, 10, 10, 11, 10, 11,
];

#[rustfmt::skip]
const BISHOP_BITS: [u8; 64] = [
    5, 4, 5, 5, 5, 5, 4, 5,
    4, 4, 5, 5, 5, 5, 4, 4,
    4, 4, 7, 7, 7, 7, 4, 4,
    5, 5, 7, 9, 9, 7, 5, 5,
    5, 5, 7, 9, 9, 7, 5, 5,
    4, 4, 7, 7, 7, 7, 4, 4,
    4, 4, 5, 5, 5, 5, 4, 4,
    5, 4, 5, 5, 5, 5, 4, 5,
];

static ROOK_TABLE: LazyLock<MagicTable> =
    LazyLock::new(|| MagicTable::build(&ROOK_MAGICS, &ROOK_BITS, &ROOK_DIRS, "rook"));
static BISHOP_TABLE: LazyLock<MagicTable> =
    LazyLock::new(|| MagicTable::build(&BISHOP_MAGICS, &BISHOP_BITS, &BISHOP_DIRS, "bishop"));

/// Rook attacks from `square` given board `occupancy`, via magic multiplication.
#[inline]
pub(crate) fn rook_attacks(square: usize, occupancy: u64) -> u64 {
    ROOK_TABLE.attacks(square, occupancy)
}

/// Bishop attacks from `square` given board `occupancy`, via magic multiplication.
#[inline]
pub(crate) fn bishop_attacks(square: usize, occupancy: u64) -> u64 {
    BISHOP_TABLE.attacks(square, occupancy)
}

/// Queen attacks are the union of rook and bishop attacks.
#[inline]
pub(crate) fn queen_attacks(square: usize, occupancy: u64) -> u64 {
    rook_attacks(square, occupancy) | bishop_attacks(square, occupancy)
}

/// Forces table construction (and its internal oracle verification) to run now rather
/// than lazily on first lookup. Useful at process start, before any worker spawns.
pub fn init() {
    LazyLock::force(&ROOK_TABLE);
    LazyLock::force(&BISHOP_TABLE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn matches_oracle_on_sample_occupancies() {
        let samples = [0u64, 0xFF00FF00FF00FF00, 0x00FF_00FF_00FF_00FF, 0x8100_0000_0000_0081];
        for sq in 0..64 {
            for &occ in &samples {
                assert_eq!(rook_attacks(sq, occ), ray_walk_attacks(sq, occ, &ROOK_DIRS));
                assert_eq!(bishop_attacks(sq, occ), ray_walk_attacks(sq, occ, &BISHOP_DIRS));
            }
        }
    }

    #[test]
    fn queen_is_union_of_rook_and_bishop() {
        for sq in 0..64 {
            let occ = 0x0000_1824_0000_0000u64;
            assert_eq!(
                queen_attacks(sq, occ),
                rook_attacks(sq, occ) | bishop_attacks(sq, occ)
            );
        }
    }

    proptest! {
        #[test]
        fn prop_magic_lookup_matches_ray_walk_oracle(sq in 0usize..64, occ in any::<u64>()) {
            prop_assert_eq!(rook_attacks(sq, occ), ray_walk_attacks(sq, occ, &ROOK_DIRS));
            prop_assert_eq!(bishop_attacks(sq, occ), ray_walk_attacks(sq, occ, &BISHOP_DIRS));
        }

        #[test]
        fn prop_queen_is_union_of_rook_and_bishop(sq in 0usize..64, occ in any::<u64>()) {
            prop_assert_eq!(queen_attacks(sq, occ), rook_attacks(sq, occ) | bishop_attacks(sq, occ));
        }
    }
}
