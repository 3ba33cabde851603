use anyhow::{Context, Result, bail};

/// Resolve CLI seed tokens: integers (sign dropped), hex with `0x`, and
/// inclusive ranges like `10..14`. Duplicates are dropped, order kept.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>> {
    let mut seeds: Vec<u64> = Vec::new();
    for token in tokens {
        for seed in parse_token(token)? {
            if !seeds.contains(&seed) {
                seeds.push(seed);
            }
        }
    }
    if seeds.is_empty() {
        seeds.push(1337);
    }
    Ok(seeds)
}

fn parse_token(token: &str) -> Result<Vec<u64>> {
    let token = token.trim();
    if token.is_empty() {
        return Ok(Vec::new());
    }
    if let Some((start, end)) = token.split_once("..") {
        let start = parse_single(start)?;
        let end = parse_single(end)?;
        if end < start {
            bail!("Seed range {token} runs backwards");
        }
        return Ok((start..=end).collect());
    }
    Ok(vec![parse_single(token)?])
}

fn parse_single(raw: &str) -> Result<u64> {
    let raw = raw.trim();
    if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16)
            .with_context(|| format!("Unrecognized seed token: {raw}"));
    }
    if let Ok(value) = raw.parse::<i64>() {
        return Ok(value.unsigned_abs());
    }
    raw.parse::<u64>()
        .with_context(|| format!("Unrecognized seed token: {raw}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn resolves_numbers_hex_and_ranges() {
        let seeds = resolve_seed_inputs(&tokens(&["42", "-7", "0x10", "3..5", "4"])).unwrap();
        assert_eq!(seeds, vec![42, 7, 16, 3, 4, 5]);
    }

    #[test]
    fn empty_input_falls_back_to_default_seed() {
        assert_eq!(resolve_seed_inputs(&[]).unwrap(), vec![1337]);
    }

    #[test]
    fn rejects_garbage_and_backwards_ranges() {
        assert!(resolve_seed_inputs(&tokens(&["banana"])).is_err());
        assert!(resolve_seed_inputs(&tokens(&["9..2"])).is_err());
    }
}
