//! Error correction integration tests
//!
//! Corruption scenarios driven through the public decode surface: single
//! and repeated byte errors, random share subsets, and the detection
//! bound where corruption exceeds what the code can repair.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use rsfec::{Fec, Share};

fn some_shares(fec: &Fec, block: usize) -> (Vec<u8>, Vec<Share>) {
    // seed the initial data
    let data: Vec<u8> = (0..fec.required() * block)
        .map(|i| (i + 1) as u8)
        .collect();

    let mut shares = Vec::new();
    fec.encode(&data, |num, data| {
        shares.push(Share::new(num, data.to_vec()))
    })
    .unwrap();

    (data, shares)
}

fn decode_to_map(fec: &Fec, shares: &mut Vec<Share>) -> BTreeMap<usize, Vec<u8>> {
    let mut decoded = BTreeMap::new();
    fec.decode_to(shares, |num, data| {
        decoded.insert(num, data.to_vec());
    })
    .unwrap();
    decoded
}

fn mutate_share(rng: &mut StdRng, share: &mut Share, idx: usize) {
    let orig = share.data[idx];
    let mut next: u8 = rng.gen();
    while next == orig {
        next = rng.gen();
    }
    share.data[idx] = next;
}

#[test]
fn test_multiple_block() {
    let block = 4096;
    let fec = Fec::new(3, 7).unwrap();
    let (_, mut shares) = some_shares(&fec, block);
    let pristine = shares.clone();

    fec.decode_to(&mut shares, |_, _| {}).unwrap();

    shares[0].data[0] = shares[0].data[0].wrapping_add(1);
    shares[1].data[0] = shares[1].data[0].wrapping_add(1);

    let decoded = decode_to_map(&fec, &mut shares);

    assert_eq!(decoded.len(), 3);
    for (num, data) in decoded {
        assert_eq!(data, pristine[num].data, "share {num}");
    }
}

#[test]
fn test_decode() {
    let block = 4096;
    let fec = Fec::new(3, 7).unwrap();
    let (data, mut shares) = some_shares(&fec, block);

    let mut output = vec![0u8; data.len() + 1];
    let output_len = fec.decode(&mut shares, &mut output).unwrap();
    assert_eq!(output_len, data.len());
    assert_eq!(data, output[..output_len]);
}

#[test]
fn test_mostly_zero_input() {
    let fec = Fec::new(20, 40).unwrap();

    let mut buf = vec![0u8; 200];
    buf.extend(std::iter::repeat(0x14).take(20));

    let mut shares = Vec::new();
    fec.encode(&buf, |num, data| shares.push(Share::new(num, data.to_vec())))
        .unwrap();

    shares[0].data[0] = shares[0].data[0].wrapping_add(1);

    fec.decode_to(&mut shares, |_, _| {}).unwrap();
}

#[test]
fn test_repeated_random_errors() {
    let block = 1024;
    let total = 7;
    let required = 3;
    let repetitions = 50;

    let fec = Fec::new(required, total).unwrap();
    let (_, shares) = some_shares(&fec, block);
    let mut rng = StdRng::seed_from_u64(0xbad5eed);

    for rep in 0..repetitions {
        let mut shares_copy = shares.clone();

        // two errors per byte column stay within the correction bound
        // for (7 - 3) / 2
        for j in 0..block {
            let a = rng.gen_range(0..total);
            let b = rng.gen_range(0..total);
            mutate_share(&mut rng, &mut shares_copy[a], j);
            mutate_share(&mut rng, &mut shares_copy[b], j);
        }

        let decoded = decode_to_map(&fec, &mut shares_copy);
        for (num, data) in decoded {
            assert_eq!(data, shares[num].data, "rep {rep} share {num}");
        }
    }
}

#[test]
fn test_random_share_subsets() {
    let block = 512;
    let total = 7;
    let required = 3;
    let repetitions = 50;

    let fec = Fec::new(required, total).unwrap();
    let (_, shares) = some_shares(&fec, block);
    let mut rng = StdRng::seed_from_u64(0xc0ffee);

    for rep in 0..repetitions {
        let mut test_shares = shares.clone();
        test_shares.shuffle(&mut rng);
        let keep = required + 2 + rng.gen_range(0..total - required - 2);
        test_shares.truncate(keep);

        // one error per column is within the bound for every kept size
        for j in 0..block {
            let victim = rng.gen_range(0..test_shares.len());
            mutate_share(&mut rng, &mut test_shares[victim], j);
        }

        let decoded = decode_to_map(&fec, &mut test_shares);
        assert_eq!(decoded.len(), required, "rep {rep}");
        for (num, data) in decoded {
            assert_eq!(data, shares[num].data, "rep {rep} share {num}");
        }
    }
}

#[test]
fn test_too_many_errors_is_detected() {
    let block = 8;
    let fec = Fec::new(3, 7).unwrap();
    let (_, shares) = some_shares(&fec, block);
    let mut rng = StdRng::seed_from_u64(42);

    // corrupting more shares than the locator can tolerate must either
    // error out or still return the original data, never silent garbage
    let mut corrupted = shares.clone();
    for share in corrupted.iter_mut().take(5) {
        mutate_share(&mut rng, share, 0);
    }

    let mut decoded = BTreeMap::new();
    match fec.decode_to(&mut corrupted, |num, data| {
        decoded.insert(num, data.to_vec());
    }) {
        Err(_) => {}
        Ok(()) => {
            for (num, data) in decoded {
                assert_eq!(data, shares[num].data, "share {num}");
            }
        }
    }
}
