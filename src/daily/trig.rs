//! Sine with the exact rounding of browser `Math.sin`
//!
//! Browsers compute `Math.sin` with the fdlibm algorithm. Platform `sin`
//! implementations agree with it to within an ulp but not bit for bit, and
//! a single flipped bit in the low digits changes a day's secret. Every step
//! here is ordinary IEEE double arithmetic in a fixed order, so the result
//! is the same on every target.

#![allow(clippy::cast_possible_wrap, clippy::unreadable_literal)]

const TWO24: f64 = 16_777_216.0;
const TWON24: f64 = 5.960_464_477_539_062_5e-8;

const INV_PIO2: f64 = f64::from_bits(0x3FE4_5F30_6DC9_C883);
const PIO2_1: f64 = f64::from_bits(0x3FF9_21FB_5440_0000);
const PIO2_1T: f64 = f64::from_bits(0x3DD0_B461_1A62_6331);
const PIO2_2: f64 = f64::from_bits(0x3DD0_B461_1A60_0000);
const PIO2_2T: f64 = f64::from_bits(0x3BA3_198A_2E03_7073);
const PIO2_3: f64 = f64::from_bits(0x3BA3_198A_2E00_0000);
const PIO2_3T: f64 = f64::from_bits(0x397B_839A_2520_49C1);

const S1: f64 = f64::from_bits(0xBFC5_5555_5555_5549);
const S2: f64 = f64::from_bits(0x3F81_1111_1110_F8A6);
const S3: f64 = f64::from_bits(0xBF2A_01A0_19C1_61D5);
const S4: f64 = f64::from_bits(0x3EC7_1DE3_57B1_FE7D);
const S5: f64 = f64::from_bits(0xBE5A_E5E6_8A2B_9CEB);
const S6: f64 = f64::from_bits(0x3DE5_D93A_5ACF_D57C);

const C1: f64 = f64::from_bits(0x3FA5_5555_5555_554C);
const C2: f64 = f64::from_bits(0xBF56_C16C_16C1_5177);
const C3: f64 = f64::from_bits(0x3EFA_01A0_19CB_1590);
const C4: f64 = f64::from_bits(0xBE92_7E4F_809C_52AD);
const C5: f64 = f64::from_bits(0x3E21_EE9E_BDB4_B1C4);
const C6: f64 = f64::from_bits(0xBDA8_FAE9_BE88_38D4);

/// High words of `n * pi/2` for `n` in `1..=32`
const NPIO2_HW: [i32; 32] = [
    0x3ff9_21fb, 0x4009_21fb, 0x4012_d97c, 0x4019_21fb,
    0x401f_6a7a, 0x4022_d97c, 0x4025_fdbb, 0x4029_21fb,
    0x402c_463a, 0x402f_6a7a, 0x4031_475c, 0x4032_d97c,
    0x4034_6b9c, 0x4035_fdbb, 0x4037_8fdb, 0x4039_21fb,
    0x403a_b41b, 0x403c_463a, 0x403d_d85a, 0x403f_6a7a,
    0x4040_7e4c, 0x4041_475c, 0x4042_106c, 0x4042_d97c,
    0x4043_a28c, 0x4044_6b9c, 0x4045_34ac, 0x4045_fdbb,
    0x4046_c6cb, 0x4047_8fdb, 0x4048_58eb, 0x4049_21fb,
];

/// `2/pi` in 24-bit chunks
const IPIO2: [i32; 66] = [
    0xA2_F983, 0x6E_4E44, 0x15_29FC, 0x27_57D1, 0xF5_34DD, 0xC0_DB62,
    0x95_993C, 0x43_9041, 0xFE_5163, 0xAB_DEBB, 0xC5_61B7, 0x24_6E3A,
    0x42_4DD2, 0xE0_0649, 0x2E_EA09, 0xD1_921C, 0xFE_1DEB, 0x1C_B129,
    0xA7_3EE8, 0x82_35F5, 0x2E_BB44, 0x84_E99C, 0x70_26B4, 0x5F_7E41,
    0x39_91D6, 0x39_8353, 0x39_F49C, 0x84_5F8B, 0xBD_F928, 0x3B_1FF8,
    0x97_FFDE, 0x05_980F, 0xEF_2F11, 0x8B_5A0A, 0x6D_1F6D, 0x36_7ECF,
    0x27_CB09, 0xB7_4F46, 0x3F_669E, 0x5F_EA2D, 0x75_27BA, 0xC7_EBE5,
    0xF1_7B3D, 0x07_39F7, 0x8A_5292, 0xEA_6BFB, 0x5F_B11F, 0x8D_5D08,
    0x56_0330, 0x46_FC7B, 0x6B_ABF0, 0xCF_BC20, 0x9A_F436, 0x1D_A9E3,
    0x91_615E, 0xE6_1B08, 0x65_9985, 0x5F_14A0, 0x68_408D, 0xFF_D880,
    0x4D_7327, 0x31_0606, 0x15_56CA, 0x73_A8C9, 0x60_E27B, 0xC0_8C6B,
];

/// `pi/2` in 24-bit chunks
const PIO2: [f64; 8] = [
    f64::from_bits(0x3FF9_21FB_4000_0000),
    f64::from_bits(0x3E74_442D_0000_0000),
    f64::from_bits(0x3CF8_4698_8000_0000),
    f64::from_bits(0x3B78_CC51_6000_0000),
    f64::from_bits(0x39F0_1B83_8000_0000),
    f64::from_bits(0x387A_2520_4000_0000),
    f64::from_bits(0x36E3_8222_8000_0000),
    f64::from_bits(0x3569_F31D_0000_0000),
];

/// Terms kept in the large-argument reduction, enough for a double-double
const JK: usize = 4;

fn high_word(x: f64) -> i32 {
    (x.to_bits() >> 32) as i32
}

fn low_word(x: f64) -> u32 {
    x.to_bits() as u32
}

fn from_words(high: i32, low: u32) -> f64 {
    f64::from_bits((u64::from(high as u32) << 32) | u64::from(low))
}

/// `x * 2^n` for the exponent range the reduction produces
fn scale(x: f64, n: i32) -> f64 {
    x * f64::from_bits(((0x3ff + i64::from(n)) as u64) << 52)
}

/// Sine of `x`, bit-identical to browser `Math.sin`
pub(super) fn sin(x: f64) -> f64 {
    let ix = high_word(x) & 0x7fff_ffff;
    if ix <= 0x3fe9_21fb {
        return kernel_sin(x, 0.0, false);
    }
    if ix >= 0x7ff0_0000 {
        return x - x;
    }

    let (n, y0, y1) = rem_pio2(x);
    match n & 3 {
        0 => kernel_sin(y0, y1, true),
        1 => kernel_cos(y0, y1),
        2 => -kernel_sin(y0, y1, true),
        _ => -kernel_cos(y0, y1),
    }
}

/// Sine on `[-pi/4, pi/4]`; `y` is the tail of a reduced argument
fn kernel_sin(x: f64, y: f64, has_tail: bool) -> f64 {
    let ix = high_word(x) & 0x7fff_ffff;
    if ix < 0x3e40_0000 && x as i32 == 0 {
        return x;
    }
    let z = x * x;
    let v = z * x;
    let r = S2 + z * (S3 + z * (S4 + z * (S5 + z * S6)));
    if has_tail {
        x - ((z * (0.5 * y - v * r) - y) - v * S1)
    } else {
        x + v * (S1 + z * r)
    }
}

/// Cosine on `[-pi/4, pi/4]`; `y` is the tail of a reduced argument
fn kernel_cos(x: f64, y: f64) -> f64 {
    let ix = high_word(x) & 0x7fff_ffff;
    if ix < 0x3e40_0000 && x as i32 == 0 {
        return 1.0;
    }
    let z = x * x;
    let r = z * (C1 + z * (C2 + z * (C3 + z * (C4 + z * (C5 + z * C6)))));
    if ix < 0x3fd3_3333 {
        return 1.0 - (0.5 * z - (z * r - x * y));
    }
    let qx = if ix > 0x3fe9_0000 {
        0.28125
    } else {
        from_words(ix - 0x0020_0000, 0)
    };
    let hz = 0.5 * z - qx;
    let a = 1.0 - qx;
    a - (hz - (z * r - x * y))
}

/// Reduce `x` to `y0 + y1` in `[-pi/4, pi/4]`, returning the quadrant too
fn rem_pio2(x: f64) -> (i32, f64, f64) {
    let hx = high_word(x);
    let ix = hx & 0x7fff_ffff;

    if ix < 0x4002_d97c {
        // |x| < 3pi/4: one step of pi/2
        let sign = if hx > 0 { 1.0 } else { -1.0 };
        let mut z = x - sign * PIO2_1;
        let (y0, y1) = if ix == 0x3ff9_21fb {
            z -= sign * PIO2_2;
            let y0 = z - sign * PIO2_2T;
            (y0, (z - y0) - sign * PIO2_2T)
        } else {
            let y0 = z - sign * PIO2_1T;
            (y0, (z - y0) - sign * PIO2_1T)
        };
        return (if hx > 0 { 1 } else { -1 }, y0, y1);
    }

    if ix <= 0x4139_21fb {
        // |x| up to about 2^19 * pi/2: Cody-Waite in up to three steps
        let t = x.abs();
        let n = (t * INV_PIO2 + 0.5) as i32;
        let fn_ = f64::from(n);
        let mut r = t - fn_ * PIO2_1;
        let mut w = fn_ * PIO2_1T;
        let mut y0 = r - w;
        let near_multiple = n < 32 && ix == NPIO2_HW[(n - 1) as usize];
        if n >= 32 || near_multiple {
            let j = ix >> 20;
            let i = j - ((high_word(y0) >> 20) & 0x7ff);
            if i > 16 {
                let t = r;
                w = fn_ * PIO2_2;
                r = t - w;
                w = fn_ * PIO2_2T - ((t - r) - w);
                y0 = r - w;
                let i = j - ((high_word(y0) >> 20) & 0x7ff);
                if i > 49 {
                    let t = r;
                    w = fn_ * PIO2_3;
                    r = t - w;
                    w = fn_ * PIO2_3T - ((t - r) - w);
                    y0 = r - w;
                }
            }
        }
        let y1 = (r - y0) - w;
        return if hx < 0 { (-n, -y0, -y1) } else { (n, y0, y1) };
    }

    // Large |x|: split into 24-bit pieces and reduce against 2/pi
    let e0 = (ix >> 20) - 1046;
    let mut z = from_words(ix - (e0 << 20), low_word(x));
    let mut tx = [0.0; 3];
    for piece in tx.iter_mut().take(2) {
        *piece = f64::from(z as i32);
        z = (z - *piece) * TWO24;
    }
    tx[2] = z;
    let mut nx = 3;
    while tx[nx - 1] == 0.0 {
        nx -= 1;
    }

    let (n, y0, y1) = kernel_rem_pio2(&tx[..nx], e0);
    if hx < 0 { (-n, -y0, -y1) } else { (n, y0, y1) }
}

/// `sum(x[j] * f[end - j])` over all of `x`, in index order
fn convolve(x: &[f64], f: &[f64], end: usize) -> f64 {
    let mut sum = 0.0;
    for (j, &xj) in x.iter().enumerate() {
        sum += xj * f[end - j];
    }
    sum
}

/// Multi-precision reduction for arguments beyond the Cody-Waite range
#[allow(clippy::needless_range_loop, clippy::many_single_char_names)]
fn kernel_rem_pio2(x: &[f64], e0: i32) -> (i32, f64, f64) {
    let jx = x.len() - 1;
    let jv = ((e0 - 3) / 24).max(0);
    let mut q0 = e0 - 24 * (jv + 1);
    let jv = jv as usize;

    let mut f = [0.0; 20];
    let mut q = [0.0; 20];
    let mut iq = [0i32; 20];

    for i in 0..=jx + JK {
        f[i] = (jv + i)
            .checked_sub(jx)
            .map_or(0.0, |j| f64::from(IPIO2[j]));
    }
    for i in 0..=JK {
        q[i] = convolve(x, &f, jx + i);
    }

    let mut jz = JK;
    let (mut z, mut n, mut ih);
    loop {
        // Distill q into 24-bit integers, most significant last
        z = q[jz];
        for (i, j) in (1..=jz).rev().enumerate() {
            let fw = f64::from((TWON24 * z) as i32);
            iq[i] = (z - TWO24 * fw) as i32;
            z = q[j - 1] + fw;
        }

        z = scale(z, q0);
        z -= 8.0 * (z * 0.125).floor();
        n = z as i32;
        z -= f64::from(n);
        ih = 0;
        if q0 > 0 {
            let i = iq[jz - 1] >> (24 - q0);
            n += i;
            iq[jz - 1] -= i << (24 - q0);
            ih = iq[jz - 1] >> (23 - q0);
        } else if q0 == 0 {
            ih = iq[jz - 1] >> 23;
        } else if z >= 0.5 {
            ih = 2;
        }

        if ih > 0 {
            // Fraction is at least 1/2: take the complement
            n += 1;
            let mut carry = false;
            for digit in &mut iq[..jz] {
                if carry {
                    *digit = 0xff_ffff - *digit;
                } else if *digit != 0 {
                    carry = true;
                    *digit = 0x100_0000 - *digit;
                }
            }
            match q0 {
                1 => iq[jz - 1] &= 0x7f_ffff,
                2 => iq[jz - 1] &= 0x3f_ffff,
                _ => {}
            }
            if ih == 2 {
                z = 1.0 - z;
                if carry {
                    z -= scale(1.0, q0);
                }
            }
        }

        if z == 0.0 && iq[JK..jz].iter().all(|&d| d == 0) {
            // Catastrophic cancellation: pull in more chunks of 2/pi
            let mut k = 1;
            while iq[JK - k] == 0 {
                k += 1;
            }
            for i in jz + 1..=jz + k {
                f[jx + i] = f64::from(IPIO2[jv + i]);
                q[i] = convolve(x, &f, jx + i);
            }
            jz += k;
            continue;
        }
        break;
    }

    if z == 0.0 {
        jz -= 1;
        q0 -= 24;
        while iq[jz] == 0 {
            jz -= 1;
            q0 -= 24;
        }
    } else {
        z = scale(z, -q0);
        if z >= TWO24 {
            let fw = f64::from((TWON24 * z) as i32);
            iq[jz] = (z - TWO24 * fw) as i32;
            jz += 1;
            q0 += 24;
            iq[jz] = fw as i32;
        } else {
            iq[jz] = z as i32;
        }
    }

    let mut fw = scale(1.0, q0);
    for i in (0..=jz).rev() {
        q[i] = fw * f64::from(iq[i]);
        fw *= TWON24;
    }

    let mut fq = [0.0; 20];
    for i in (0..=jz).rev() {
        let mut fw = 0.0;
        for k in 0..=JK.min(jz - i) {
            fw += PIO2[k] * q[i + k];
        }
        fq[jz - i] = fw;
    }

    let mut fw = 0.0;
    for i in (0..=jz).rev() {
        fw += fq[i];
    }
    let y0 = if ih == 0 { fw } else { -fw };
    let mut fw = fq[0] - fw;
    for i in 1..=jz {
        fw += fq[i];
    }
    let y1 = if ih == 0 { fw } else { -fw };

    (n & 7, y0, y1)
}
