fn main() -> Result<(), Box<dyn std::error::Error>> {
    // tonic-build no longer ships protoc, point it at the vendored one
    std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    tonic_build::compile_protos("proto/polls.proto")?;
    Ok(())
}
