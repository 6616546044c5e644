use envtree::DescribeConfig;

#[derive(DescribeConfig)]
struct TestConfig {
    #[config(skip, env = "APP_PORT")]
    port: u16,
}

fn main() {}
