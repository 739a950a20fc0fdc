use xxhash_rust::xxh3::Xxh3;

use crate::scene::payload::{ParentAttribution, ResultPayload};

const XXH3_SEED: u64 = 0x6c1b_33a9_52e0_d47f;

/// Stable fingerprint of everything a render pass reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct PassFingerprint {
    pub(crate) hi: u64,
    pub(crate) lo: u64,
}

/// Inputs of one pass, borrowed from the compositor.
pub(crate) struct PassInputs<'a> {
    pub(crate) image_digest: u64,
    pub(crate) payload: &'a ResultPayload,
    pub(crate) width: f64,
    pub(crate) device_pixel_ratio: f64,
    pub(crate) opts_digest: u64,
}

pub(crate) fn fingerprint_pass(inputs: &PassInputs<'_>) -> PassFingerprint {
    let mut h = StableHasher::new();
    h.write_u64(inputs.image_digest);
    write_payload(&mut h, inputs.payload);
    h.write_f64(inputs.width);
    h.write_f64(inputs.device_pixel_ratio);
    h.write_u64(inputs.opts_digest);
    h.finish()
}

/// 64-bit digest of raw bytes (decoded pixels, serialized options).
pub(crate) fn digest_bytes(bytes: &[u8]) -> u64 {
    let mut h = Xxh3::with_seed(XXH3_SEED);
    h.update(bytes);
    h.digest()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_i64(&mut self, v: i64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> PassFingerprint {
        let v = self.inner.digest128();
        PassFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_payload(h: &mut StableHasher, p: &ResultPayload) {
    h.write_u64(p.analysis_results.len() as u64);
    for f in &p.analysis_results {
        h.write_str(&f.part);
        h.write_u8(match f.similar_to {
            ParentAttribution::Father => 0,
            ParentAttribution::Mother => 1,
        });
        h.write_i64(f.similarity_score);
        h.write_str(&f.description);
    }
    let anchor = p.resolved_face_center();
    h.write_f64(anchor.x);
    h.write_f64(anchor.y);
    h.write_f64(p.resolved_face_width());
}

#[cfg(test)]
#[path = "../../tests/unit/session/fingerprint.rs"]
mod tests;
