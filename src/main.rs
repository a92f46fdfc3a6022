/*!
route_trace
=====

Build a network from a configuration file and follow packets through its routing units.

```ignore
route_trace -c network.cfg -s 0 -d 13 -v 1
route_trace -c network.cfg -a
```

Without a configuration file a 4x4x2 mesh with `DOR3D` routing is used.
*/

use std::env;
use std::path::Path;

use itertools::Itertools;

use caminos_routing_unit::{Network,Plugs,Error,Hop};
use caminos_routing_unit::config::{load_configuration,parse_configuration};
use caminos_routing_unit::quantify::Quantifiable;
use caminos_routing_unit::error;

const DEFAULT_CONFIGURATION:&str = "Network{ topology: Mesh{rows:4, columns:4, depths:2}, routing: DOR3D, virtual_channels: 2, random_seed: 42 }";

fn terminal_options() -> getopts::Options
{
	let mut opts = getopts::Options::new();
	opts.optopt("c","config","configuration file of the network","FILE");
	opts.optopt("s","source","router injecting the packet","ROUTER");
	opts.optopt("d","destination","router consuming the packet","ROUTER");
	opts.optopt("v","vnet","traffic class of the packet","VNET");
	opts.optflag("a","all","trace every pair of routers and print a summary");
	opts.optflag("m","memory","print the memory breakdown of the network");
	opts.optflag("h","help","show this help");
	opts
}

fn print_usage(program:&str, opts:&getopts::Options)
{
	let brief = format!("Usage: {} [options]",program);
	print!("{}",opts.usage(&brief));
}

fn main()
{
	let args: Vec<String> = env::args().collect();
	let opts = terminal_options();
	let option_matches = match opts.parse(&args[1..])
	{
		Ok(m) => m,
		Err(f) =>
		{
			eprintln!("{}",f);
			print_usage(&args[0],&opts);
			std::process::exit(-1);
		}
	};
	if option_matches.opt_present("help")
	{
		print_usage(&args[0],&opts);
		return;
	}
	if let Err(error) = run(&option_matches)
	{
		eprintln!("{}",error);
		std::process::exit(-1);
	}
}

///Read a router or vnet index given in the command line.
fn index_option(option_matches:&getopts::Matches, name:&str, default:usize) -> Result<usize,Error>
{
	match option_matches.opt_str(name)
	{
		None => Ok(default),
		Some(s) => s.parse::<usize>().map_err(|_|error!(bad_argument).with_message(format!("--{}={} is not a valid index",name,s))),
	}
}

fn format_trace(hops:&[Hop]) -> String
{
	hops.iter().map(|hop|format!("{}:{}[vc{}]",hop.router,hop.direction,hop.virtual_channel)).join(" -> ")
}

fn run(option_matches:&getopts::Matches) -> Result<(),Error>
{
	let now = chrono::Local::now();
	println!("route_trace started at {}",now.format("%Y-%m-%d %H:%M:%S"));
	let cv = match option_matches.opt_str("config")
	{
		Some(path) => load_configuration(Path::new(&path))?,
		None => parse_configuration(DEFAULT_CONFIGURATION)?,
	};
	println!("configuration: {}",cv);
	let plugs = Plugs::default();
	let mut network = Network::new(&cv,&plugs)?;
	let n = network.num_routers();
	println!("routers: {} vnets: {} virtual channels: {}",n,network.vnets(),network.virtual_channels());
	println!("memory: {} bytes",network.total_memory());
	if option_matches.opt_present("memory")
	{
		network.print_memory_breakdown();
	}
	let vnet = index_option(option_matches,"vnet",0)?;
	if option_matches.opt_present("all")
	{
		let mut pairs = 0usize;
		let mut total_hops = 0usize;
		let mut escaped = 0usize;
		for (source,destination) in (0..n).cartesian_product(0..n)
		{
			let hops = network.trace(source,destination,vnet)?;
			pairs+=1;
			//The last hop is the consumption at the destination.
			total_hops+=hops.len()-1;
			if hops.iter().any(|hop|hop.virtual_channel!=0)
			{
				escaped+=1;
			}
		}
		println!("pairs: {}",pairs);
		println!("average hops: {:.3}",total_hops as f64/pairs as f64);
		println!("pairs using a nonzero virtual channel: {}",escaped);
	}
	else
	{
		let source = index_option(option_matches,"source",0)?;
		let destination = index_option(option_matches,"destination",n-1)?;
		let hops = network.trace(source,destination,vnet)?;
		println!("{}",format_trace(&hops));
		println!("hops: {}",hops.len()-1);
	}
	Ok(())
}
