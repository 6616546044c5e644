use envtree::DescribeConfig;

#[derive(DescribeConfig)]
struct TestConfig {
    #[config(env = "APP_PORT", default = "80")]
    port: u16,
}

fn main() {}
