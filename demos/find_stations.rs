use gasofa::Gasofa;
use std::env;

/// Usage: find_stations [LAT] [LON] [FUEL] [RADIUS_KM]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let latitude = args.first().map(|s| s.parse()).transpose()?.unwrap_or(40.4168);
    let longitude = args.get(1).map(|s| s.parse()).transpose()?.unwrap_or(-3.7038);
    let fuel_type = args.get(2).map(String::as_str).unwrap_or("G95");
    let radius_km = args.get(3).map(|s| s.parse()).transpose()?;

    let client = Gasofa::new().await?;
    let stations = client
        .find_stations()
        .latitude(latitude)
        .longitude(longitude)
        .fuel_type(fuel_type)
        .maybe_radius_km(radius_km)
        .call()
        .await?;

    println!("{}", serde_json::to_string_pretty(&stations)?);
    Ok(())
}
