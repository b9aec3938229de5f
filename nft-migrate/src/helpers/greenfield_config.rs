use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Writes the config file read by `gnfd-cmd` through its `-c` flag.
pub fn write_greenfield_config(path: &Path, rpc_addr: &str, chain_id: &str) -> io::Result<()> {
    let content = format!("rpcAddr = \"{}\"\nchainId = \"{}\"\n", rpc_addr, chain_id);
    fs::write(path, content)?;
    debug!("Greenfield client config written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_write_rpc_address_and_chain_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        write_greenfield_config(
            &path,
            "https://greenfield-chain.bnbchain.org:443",
            "greenfield_1017-1",
        )
        .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "rpcAddr = \"https://greenfield-chain.bnbchain.org:443\"\nchainId = \"greenfield_1017-1\"\n"
        );
    }
}
