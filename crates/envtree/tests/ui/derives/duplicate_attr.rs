use envtree::DescribeConfig;

#[derive(DescribeConfig)]
struct TestConfig {
    #[config(env = "APP_PORT", env = "PORT")]
    port: u16,
}

fn main() {}
