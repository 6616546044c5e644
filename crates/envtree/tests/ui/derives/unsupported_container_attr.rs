use envtree::DescribeConfig;

#[derive(DescribeConfig)]
#[config(rename = "app")]
struct TestConfig {
    #[config(env = "APP_PORT")]
    port: u16,
}

fn main() {}
