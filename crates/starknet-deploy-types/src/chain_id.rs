use starknet_core::utils::cairo_short_string_to_felt;
use starknet_types_core::felt::Felt;

/// Converts a chain name such as `SN_SEPOLIA` into its felt encoding.
pub fn chain_id_to_felt(chain_id: &str) -> Option<Felt> {
    cairo_short_string_to_felt(chain_id).ok()
}

/// Reads a chain ID felt back as its ASCII name.
/// Leading zeroes are skipped.
pub fn chain_id_from_felt(felt: Felt) -> String {
    // Skip leading zeroes
    let chain_id_bytes: Vec<_> = felt.to_bytes_be().into_iter().skip_while(|byte| *byte == 0u8).collect();
    String::from_utf8_lossy(&chain_id_bytes).into_owned()
}
